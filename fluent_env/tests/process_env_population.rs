//! Population tests against the real process environment.
//!
//! These mutate actual environment variables, so they hold the shared
//! guard from `test_helpers::env` and run serially.

#![cfg(feature = "dotenvy")]

use anyhow::{Result, ensure};
use fluent_env::FluentEnv;
use serial_test::serial;
use test_helpers::{env as env_guard, file::EnvFileFixture};

#[test]
#[serial]
fn populates_absent_variables() -> Result<()> {
    let _fresh = env_guard::remove_var("FLUENT_ENV_TEST_FRESH");
    let fixture = EnvFileFixture::new()?;
    let path = fixture.write(".env", &[("FLUENT_ENV_TEST_FRESH", "imported")])?;

    let mut env = FluentEnv::new();
    env.populate_env(false).load(path)?;

    ensure!(std::env::var("FLUENT_ENV_TEST_FRESH")? == "imported");
    Ok(())
}

#[test]
#[serial]
fn leaves_existing_variables_alone_by_default() -> Result<()> {
    let _taken = env_guard::set_var("FLUENT_ENV_TEST_TAKEN", "pre-existing");
    let fixture = EnvFileFixture::new()?;
    let path = fixture.write(".env", &[("FLUENT_ENV_TEST_TAKEN", "imported")])?;

    let mut env = FluentEnv::new();
    env.populate_env(false).load(path)?;

    ensure!(std::env::var("FLUENT_ENV_TEST_TAKEN")? == "pre-existing");
    Ok(())
}

#[test]
#[serial]
fn overrides_existing_variables_when_asked() -> Result<()> {
    let _taken = env_guard::set_var("FLUENT_ENV_TEST_OVERRIDE", "pre-existing");
    let fixture = EnvFileFixture::new()?;
    let path = fixture.write(".env", &[("FLUENT_ENV_TEST_OVERRIDE", "imported")])?;

    let mut env = FluentEnv::new();
    env.populate_env(true).load(path)?;

    ensure!(std::env::var("FLUENT_ENV_TEST_OVERRIDE")? == "imported");
    Ok(())
}

#[test]
#[serial]
fn loading_alone_does_not_touch_the_environment() -> Result<()> {
    let _fresh = env_guard::remove_var("FLUENT_ENV_TEST_UNTOUCHED");
    let fixture = EnvFileFixture::new()?;
    let path = fixture.write(".env", &[("FLUENT_ENV_TEST_UNTOUCHED", "imported")])?;

    let mut env = FluentEnv::new();
    env.load(path)?;

    ensure!(std::env::var("FLUENT_ENV_TEST_UNTOUCHED").is_err());
    ensure!(env.get("FLUENT_ENV_TEST_UNTOUCHED") == Some("imported".to_owned()));
    Ok(())
}
