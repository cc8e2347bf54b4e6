pub mod config;
mod dist;
mod inspect;
mod paths;
mod resolve;

pub use dist::{dist, resolve_installed_dist};
pub use inspect::{classify, match_keys, match_lines, platform};
pub use resolve::{Resolution, load_root, plan_operations, resolve, resolve_all, show_plan};
