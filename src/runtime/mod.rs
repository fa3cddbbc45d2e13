/// Query runtime - Gateway

mod output;
mod pipeline;
mod request;
mod resolver;

pub use output::{emit, emit_to, SpriteSaver};
pub use pipeline::{QueryEvent, QueryPipeline, Sprite};
pub use request::{OutputTarget, Request};
pub use resolver::resolve;
