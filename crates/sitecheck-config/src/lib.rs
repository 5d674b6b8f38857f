use serde::{Deserialize, Serialize};
use sitecheck_geo::{AxisOrder, FenceCfg};
use std::env;

/// Fence tuning read from the environment. Invalid values fall back to the
/// defaults silently; gating must keep working with no configuration at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FenceSettings {
    pub buffer_m: f64,
    pub default_accuracy_m: f64,
    pub center_slack_m: f64,
    /// Convention of backend polygon payloads. The deployed backend ships
    /// swapped fields, hence the default.
    pub polygon_axis_order: AxisOrder,
}

impl Default for FenceSettings {
    fn default() -> Self {
        let cfg = FenceCfg::default();
        Self {
            buffer_m: cfg.buffer_m,
            default_accuracy_m: cfg.default_accuracy_m,
            center_slack_m: cfg.center_slack_m,
            polygon_axis_order: AxisOrder::LonLat,
        }
    }
}

impl FenceSettings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            buffer_m: env_var_f64("SITECHECK_FENCE_BUFFER_M", defaults.buffer_m),
            default_accuracy_m: env_var_f64(
                "SITECHECK_DEFAULT_ACCURACY_M",
                defaults.default_accuracy_m,
            ),
            center_slack_m: env_var_f64("SITECHECK_CENTER_SLACK_M", defaults.center_slack_m),
            polygon_axis_order: env_var_axis_order(
                "SITECHECK_POLYGON_AXIS_ORDER",
                defaults.polygon_axis_order,
            ),
        }
    }

    pub fn fence_cfg(&self) -> FenceCfg {
        FenceCfg {
            buffer_m: self.buffer_m,
            default_accuracy_m: self.default_accuracy_m,
            center_slack_m: self.center_slack_m,
        }
    }
}

fn env_var_f64(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite() && *value >= 0.0)
        .unwrap_or(default)
}

fn env_var_axis_order(key: &str, default: AxisOrder) -> AxisOrder {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<AxisOrder>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fence_cfg() {
        let settings = FenceSettings::default();
        let cfg = settings.fence_cfg();
        assert_eq!(cfg.buffer_m, 50.0);
        assert_eq!(cfg.default_accuracy_m, 15.0);
        assert_eq!(cfg.center_slack_m, 50.0);
        assert_eq!(settings.polygon_axis_order, AxisOrder::LonLat);
    }

    #[test]
    fn env_var_f64_rejects_garbage_and_negatives() {
        // Unset key falls back.
        assert_eq!(env_var_f64("SITECHECK_TEST_UNSET_KEY", 50.0), 50.0);

        unsafe { env::set_var("SITECHECK_TEST_F64", "75.5") };
        assert_eq!(env_var_f64("SITECHECK_TEST_F64", 50.0), 75.5);

        unsafe { env::set_var("SITECHECK_TEST_F64", "not a number") };
        assert_eq!(env_var_f64("SITECHECK_TEST_F64", 50.0), 50.0);

        unsafe { env::set_var("SITECHECK_TEST_F64", "-10") };
        assert_eq!(env_var_f64("SITECHECK_TEST_F64", 50.0), 50.0);

        unsafe { env::remove_var("SITECHECK_TEST_F64") };
    }

    #[test]
    fn env_var_axis_order_parses_or_falls_back() {
        unsafe { env::set_var("SITECHECK_TEST_AXIS", "lat_lon") };
        assert_eq!(
            env_var_axis_order("SITECHECK_TEST_AXIS", AxisOrder::LonLat),
            AxisOrder::LatLon
        );

        unsafe { env::set_var("SITECHECK_TEST_AXIS", "sideways") };
        assert_eq!(
            env_var_axis_order("SITECHECK_TEST_AXIS", AxisOrder::LonLat),
            AxisOrder::LonLat
        );

        unsafe { env::remove_var("SITECHECK_TEST_AXIS") };
    }
}
