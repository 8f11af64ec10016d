// SPDX-License-Identifier: MIT OR Apache-2.0
//! Environment-backed configuration tests.

use serial_test::serial;
use tbp_claude::ClaudeConfig;

#[test]
#[serial]
fn from_env_reads_the_api_key() {
    // SAFETY: `#[serial]` keeps env mutation off concurrent tests.
    unsafe { std::env::set_var("ANTHROPIC_API_KEY", "sk-ant-test") };
    let cfg = ClaudeConfig::from_env();
    unsafe { std::env::remove_var("ANTHROPIC_API_KEY") };
    assert_eq!(cfg.api_key, "sk-ant-test");
    assert_eq!(cfg.base_url, ClaudeConfig::default().base_url);
}

#[test]
#[serial]
fn from_env_without_key_stays_default() {
    // SAFETY: `#[serial]` keeps env mutation off concurrent tests.
    unsafe { std::env::remove_var("ANTHROPIC_API_KEY") };
    let cfg = ClaudeConfig::from_env();
    assert!(cfg.api_key.is_empty());
    assert_eq!(cfg.model, tbp_claude::DEFAULT_MODEL);
}
