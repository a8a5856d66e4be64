//! Eligibility screening engine for US public-benefit programs
//!
//! This crate binds a household record to an external tax/benefit
//! microsimulation engine. Dependency resolvers turn the household into
//! engine inputs, program calculators read the engine's answers back and
//! apply the rules the engine does not encode, and the registry groups every
//! calculator by jurisdiction and unit of calculation.
//!
//! # Example
//!
//! ```no_run
//! use eligibility_engine::config::ConfigLoader;
//! use eligibility_engine::engine::StaticEngine;
//! use eligibility_engine::models::{Household, HouseholdMember, MemberId, Relationship};
//! use eligibility_engine::registry::Registry;
//! use eligibility_engine::screening::Screener;
//!
//! let config = ConfigLoader::load("./config/screener").unwrap();
//! let registry = Registry::build(config.variables()).unwrap();
//! let engine = StaticEngine::new(config.engine().clone());
//! let screener = Screener::new(&registry, config.parameters(), &engine);
//!
//! let household = Household::new("screen-1", "TX", 1)
//!     .with_member(HouseholdMember::new(MemberId(1), Relationship::HeadOfHousehold, 42));
//! let result = screener.screen(&household, &["tx_snap", "eitc"]).unwrap();
//! for program in result.new_benefits() {
//!     println!("{}: {}", program.program, program.value);
//! }
//! ```

#![warn(missing_docs)]

pub mod calculators;
pub mod config;
pub mod dependencies;
pub mod engine;
pub mod error;
pub mod models;
pub mod registry;
pub mod screening;
pub mod tax_unit;
