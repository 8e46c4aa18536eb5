//! Nafta library exports for testing

use clap::ValueEnum;

pub mod core;
pub mod data;
pub mod tui;

#[cfg(test)]
pub mod test_support;

use crate::core::calculator::TripType;

/// Initial trip type, as accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TripArg {
    OneWay,
    RoundTrip,
}

impl From<TripArg> for TripType {
    fn from(arg: TripArg) -> Self {
        match arg {
            TripArg::OneWay => TripType::OneWay,
            TripArg::RoundTrip => TripType::RoundTrip,
        }
    }
}
