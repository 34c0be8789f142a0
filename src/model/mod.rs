// File: ./src/model/mod.rs
pub mod adapter;
pub mod event;
pub mod location;
pub mod title;

pub use adapter::ParsedCalendar;
pub use event::{EventRecord, EventTime, Slot, Zone};
pub use location::{merge_locations, same_location_class};
pub use title::{Title, TitleCodec, merge_titles};
