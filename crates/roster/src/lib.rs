//! `roster` - Member directory search and grouping for student-club team pages
//!
//! This library turns raw member records into the structure a team page is
//! rendered from: every member enriched with a primary department, a primary
//! role, a leadership flag and a search haystack, then filtered by a search
//! query, split into a leadership group, and grouped by department.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod leadership;
pub mod logging;
pub mod member;
pub mod reorder;
pub mod source;

pub use config::Config;
pub use error::{Error, Result};
pub use index::{
    filter, group_by_department, partition_leadership, search, DepartmentGroups, Directory,
    EnrichedMember, MemberSearchIndex, Partition,
};
pub use leadership::LeadershipRoles;
pub use logging::init_logging;
pub use member::{MemberRecord, SocialLink};
pub use reorder::{move_item, Direction};
pub use source::load_members;
