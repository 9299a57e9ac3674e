//! Flow visualization series: burndown, burnup, and cumulative flow.
//!
//! All three generators read the snapshot's transition log and return plain
//! point series ready for rendering; nothing here draws anything.

mod burndown;
mod burnup;
mod cfd;
mod types;

pub use burndown::generate_burndown;
pub use burnup::generate_burnup;
pub use cfd::generate_cfd;
pub use types::{
    Bottleneck, BurndownPoint, BurndownSeries, BurnupPoint, BurnupSeries, CfdPoint, CfdSeries,
    CumulativeFlow, FlowStage,
};
