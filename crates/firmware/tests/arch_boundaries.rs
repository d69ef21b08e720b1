//! Architecture boundary tests — run with `cargo test -p firmware --test arch_boundaries`
// Architecture test file: expect/unwrap/panic are intentional test mechanisms.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//!
//! Layering rules:
//!   Rule 1: platform (HAL traits) must not depend on loopback or firmware
//!   Rule 2: loopback (core) must not depend on a HAL crate or an executor
//!   Rule 3: only firmware may name embassy-rp, and only behind `hardware`
//!
//! The manifests are scanned as text; the compile-time checks below confirm
//! the core builds on the host against the mocks alone.

const PLATFORM_TOML: &str = include_str!("../../platform/Cargo.toml");
const LOOPBACK_TOML: &str = include_str!("../../loopback/Cargo.toml");
const FIRMWARE_TOML: &str = include_str!("../Cargo.toml");

/// Dependency keys declared in a manifest (`name = ...` lines and
/// `[dependencies.name]` headers), dev-dependencies excluded.
fn runtime_dependencies(manifest: &str) -> Vec<&str> {
    let mut deps = Vec::new();
    let mut in_deps = false;
    for line in manifest.lines().map(str::trim) {
        if line.starts_with('[') {
            if let Some(name) = line
                .strip_prefix("[dependencies.")
                .and_then(|l| l.strip_suffix(']'))
            {
                deps.push(name);
            }
            in_deps = line == "[dependencies]";
            continue;
        }
        if in_deps && !line.starts_with('#') {
            if let Some((key, _)) = line.split_once('=') {
                // `name.workspace = true` names the crate before the dot.
                deps.push(key.trim().split('.').next().unwrap());
            }
        }
    }
    deps
}

#[test]
fn platform_depends_on_no_higher_layer() {
    let deps = runtime_dependencies(PLATFORM_TOML);
    assert!(!deps.contains(&"loopback"));
    assert!(!deps.contains(&"firmware"));
}

#[test]
fn loopback_core_is_hal_free() {
    let deps = runtime_dependencies(LOOPBACK_TOML);
    for banned in ["embassy-rp", "embassy-executor", "cortex-m", "cortex-m-rt", "firmware"] {
        assert!(!deps.contains(&banned), "loopback must not depend on {banned}");
    }
    assert!(deps.contains(&"platform"));
}

#[test]
fn embassy_rp_is_optional_in_firmware() {
    let line = FIRMWARE_TOML
        .lines()
        .find(|l| l.starts_with("embassy-rp"))
        .expect("firmware declares embassy-rp");
    assert!(line.contains("optional = true"));
}

#[test]
fn manifest_scanner_sees_table_style_dependencies() {
    let deps = runtime_dependencies(PLATFORM_TOML);
    assert!(deps.contains(&"embassy-time"));
    assert!(deps.contains(&"defmt"));
}

/// The core compiles and runs against the host mocks: if loopback gained a
/// HAL dependency this integration binary would stop linking on the host.
#[test]
fn loopback_runs_against_mocks() {
    use loopback::{Loopback, Player, Sampler};
    use platform::mocks::{MockAdc, MockPwm};

    let shared: Loopback<8> = Loopback::new();
    let mut sampler = Sampler::new(&shared, MockAdc::constant(0));
    let mut player = Player::new(&shared, MockPwm::default());

    assert_eq!(sampler.on_tick(), None, "idle sampler stores nothing");
    assert_eq!(player.on_wrap(), 0, "idle player outputs silence");
}

/// Platform exposes its traits without any firmware feature.
#[test]
fn platform_traits_are_independent() {
    fn _adc<T: platform::AdcInput>() {}
    fn _pwm<T: platform::PwmOutput>() {}
    fn _timer<T: platform::SampleTimer>() {}
    _adc::<platform::mocks::MockAdc>();
    _pwm::<platform::mocks::MockPwm>();
    _timer::<platform::mocks::MockTimer>();
}
