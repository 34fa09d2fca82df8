pub mod defs;

pub use defs::{HnApi, ItemRecord, PageData, PageRenderer, Story, StoryId};
