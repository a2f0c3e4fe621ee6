pub mod energy;
pub mod scale;
pub mod types;

pub use energy::{DeltaSeries, EnergySeries};
pub use scale::{LinearScale, nice_ticks, tick_precision};
pub use types::{DataBounds, PixelRect, Viewport};
