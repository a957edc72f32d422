pub mod config;
pub mod error;
pub mod fetch;
pub mod lookup;
pub mod parser;
pub mod resolver;
pub mod schedule;
pub mod source;
pub mod web;

pub mod gtfs_rt {
    include!(concat!(env!("OUT_DIR"), "/transit_realtime.rs"));
}
