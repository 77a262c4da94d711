//! Typed resources of the Mailchimp Marketing API.
//!
//! Each module defines the resource types of one area of the API and the
//! operations on them. Operations that start from the account are methods
//! on [`MailchimpClient`](crate::MailchimpClient); operations scoped to a
//! resource are methods on that resource, using the client handle it carries.
//!
//! # Lists and Members
//!
//! ```rust,ignore
//! use mailchimp_api::rest::resources::{MemberRequest, MemberStatus};
//!
//! let list = client.get_list("abc123", None).await?;
//! let member = list
//!     .add_or_update_member(
//!         "ada@example.com",
//!         &MemberRequest::new("ada@example.com", MemberStatus::Subscribed),
//!     )
//!     .await?;
//! member.add_simple_event("signed_up").await?;
//! ```
//!
//! # Campaigns and Templates
//!
//! ```rust,ignore
//! let campaigns = client.get_campaigns(None).await?;
//! for campaign in campaigns.iter().filter(|c| c.status == "save") {
//!     let content = campaign.content(None).await?;
//!     println!("{}: {} bytes", campaign.settings.title, content.html.len());
//! }
//! ```
//!
//! # Batches
//!
//! See [`batches`] for submitting many operations as one job.

pub mod batches;
pub mod campaign_folders;
pub mod campaigns;
pub mod common;
pub mod events;
pub mod interests;
pub mod lists;
pub mod members;
pub mod merge_fields;
pub mod search;
pub mod segments;
pub mod template_folders;
pub mod templates;

pub use batches::{BatchJob, BatchOperation, BatchRequest, BatchStatus};
pub use campaign_folders::CampaignFolder;
pub use campaigns::{
    Campaign, CampaignContent, CampaignContentRequest, CampaignQueryParams, CampaignRecipients,
    CampaignRequest, CampaignSegmentOptions, CampaignSettings, CampaignTracking, CampaignType,
    ContentTemplate, DeliveryStatus, EcommerceSummary, ReportSummary, TestEmailRequest,
};
pub use common::{Address, Contact, MemberLocation};
pub use events::EventRequest;
pub use interests::{
    Interest, InterestCategory, InterestCategoryQueryParams, InterestCategoryRequest,
    InterestRequest,
};
pub use lists::{
    AbuseReport, BatchSubscribeError, BatchSubscribeRequest, BatchSubscribeResponse,
    CampaignDefaults, EmailClient, GrowthHistory, List, ListActivity, ListQueryParams,
    ListRequest, ListStats,
};
pub use members::{
    subscriber_hash, LastNote, MarketingPermission, Member, MemberActivity, MemberGoal,
    MemberNote, MemberQueryParams, MemberRequest, MemberStats, MemberStatus, MemberTag,
    TagStatus, TagUpdate,
};
pub use merge_fields::{MergeField, MergeFieldOptions, MergeFieldQueryParams, MergeFieldRequest};
pub use search::{SearchMatches, SearchMembersQueryParams, SearchMembersResponse};
pub use segments::{
    Segment, SegmentBatchError, SegmentBatchRequest, SegmentBatchResponse, SegmentCondition,
    SegmentOptions, SegmentQueryParams, SegmentRequest,
};
pub use template_folders::TemplateFolder;
pub use templates::{
    Template, TemplateDefaultContent, TemplateQueryParams, TemplateRequest,
};
