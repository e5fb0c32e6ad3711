//! Common test utilities for ringprov scenario tests.
//!
//! This module provides:
//! - `FakeHost`: a simulated Ubuntu host answering commands and file I/O
//! - `provision`: a use case wired to a `FakeHost`

pub mod host;

pub use host::*;

use chrono::NaiveDate;
use ringprov::domain::ports::{Clock, NoopSleeper};
use ringprov::infrastructure::TomlLedgerRepository;
use ringprov::{Config, ProvisionUseCase};

pub struct FixedClock;

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }
}

pub type HostUseCase<'a> =
    ProvisionUseCase<&'a FakeHost, &'a FakeHost, TomlLedgerRepository<&'a FakeHost>>;

pub fn provision(host: &FakeHost) -> HostUseCase<'_> {
    provision_with(host, Config::default())
}

pub fn provision_with(host: &FakeHost, config: Config) -> HostUseCase<'_> {
    ProvisionUseCase::new(config, host, host, TomlLedgerRepository::with_fs(host))
        .with_sleeper(NoopSleeper)
        .with_clock(FixedClock)
}
