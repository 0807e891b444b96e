// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod access;
pub mod bucket;
pub mod coverage;
pub mod decorate;
pub mod findings;
pub mod full_list;
pub mod ids;
pub mod jobs;
pub mod lenient;
pub mod load;
pub mod model;
pub mod page;
pub mod pulls;
pub mod record;
pub mod sort;
pub mod source;
pub mod trailhead;
pub mod usage;
pub mod view;

pub use access::*;
pub use bucket::*;
pub use coverage::*;
pub use decorate::*;
pub use findings::*;
pub use full_list::*;
pub use ids::*;
pub use jobs::*;
pub use load::*;
pub use model::*;
pub use page::*;
pub use pulls::*;
pub use record::*;
pub use sort::*;
pub use source::*;
pub use trailhead::*;
pub use usage::*;
pub use view::*;
