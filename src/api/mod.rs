//! Backend API: endpoint declarations, the tag cache and one module per resource.
//!
//! | Resource         | Reads                   | Writes invalidate                          |
//! |------------------|-------------------------|--------------------------------------------|
//! | category         | list, get               | category; products/filter groups on delete |
//! | product          | page, get               | product; all publications                  |
//! | product template | list, get               | template                                   |
//! | filter group     | list by category, get   | filter group; all products                 |
//! | publication      | page, get               | publication; all preorders                 |
//! | order + events   | page, get, event log    | order, its events, metrics                 |
//! | preorder         | list, get               | preorder; publication list                 |
//! | user             | page, get               | user                                       |
//! | cdek waybill     | by order, print form    | waybill, order                             |
//! | metrics          | by date range           | -                                          |
//! | faq              | list                    | faq                                        |

mod cache;
mod client;
mod endpoint;
pub mod tags;

mod category;
mod cdek;
mod faq;
mod filter_group;
mod image;
mod metrics;
mod order;
mod preorder;
mod product;
mod publication;
mod template;
mod user;

pub use cache::QueryCache;
pub use client::AdminApi;
pub use endpoint::Endpoint;
pub use tags::{Tag, TagId, TagKind};
