//! A compact built-in catalog for tests and demos.
//!
//! Four basic resources, five level-one resources, six unique level-two
//! resources and eight unique buildings, three of them starting buildings.
//!
//! | Building    | Points | Activation                           |
//! |-------------|--------|--------------------------------------|
//! | Sawmill     | 1      | spend 2 Timber, gain a Plank         |
//! | Mill        | 1      | own a Grain, gain a Flour            |
//! | Kiln        | 1      | spend a Clay, score 2                |
//! | Market Hall | 2      | spend Timber, Ore, Grain, score 1    |
//! | Forge       | 2      | own 2 Ingots, gain Tools             |
//! | Weaver      | 2      | spend 2 Cloth, gain a Garment        |
//! | Cathedral   | 5      | none                                 |
//! | Guild House | 3      | spend a Brick, score 2               |

mod catalog;

pub use catalog::{sample_cards, sample_catalog, sample_factory, sample_quantities};
