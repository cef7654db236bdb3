//! TOML scenario configuration: household, tariff, and installation inputs.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::tariff::CONTRACT_AMPERAGES;

/// Top-level scenario: the household's bill and contract, the utility's
/// rates, and the planned solar/battery installation.
///
/// Every field defaults to the baseline scenario, so a partial TOML file
/// (or an empty one) is valid. Load with [`ScenarioConfig::from_toml_file`]
/// or start from [`ScenarioConfig::baseline`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Current bill and contract parameters.
    #[serde(default)]
    pub billing: BillingConfig,
    /// Tiered volumetric rates and per-kWh adjustments.
    #[serde(default)]
    pub rates: RatesConfig,
    /// Solar installation parameters.
    #[serde(default)]
    pub solar: SolarConfig,
    /// Battery storage parameters.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Household usage profile parameters.
    #[serde(default)]
    pub household: HouseholdConfig,
    /// Long-horizon projection parameters.
    #[serde(default)]
    pub projection: ProjectionConfig,
}

/// Current bill and contract parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BillingConfig {
    /// Current monthly electricity bill (yen).
    pub monthly_bill: f64,
    /// Contracted amperage (A); must be one of the standard contract sizes.
    pub contracted_amperage: u32,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            monthly_bill: 15_000.0,
            contracted_amperage: 30,
        }
    }
}

/// Tiered volumetric rates and per-kWh adjustments.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RatesConfig {
    /// Nominal rate for the first 120 kWh (yen/kWh).
    pub tier1: f64,
    /// Nominal rate for 120-300 kWh (yen/kWh).
    pub tier2: f64,
    /// Nominal rate above 300 kWh (yen/kWh).
    pub tier3: f64,
    /// Fuel cost adjustment added to every tier (yen/kWh, may be negative).
    pub fuel_adjustment: f64,
    /// Renewable energy surcharge added to every tier (yen/kWh).
    pub renewable_surcharge: f64,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            tier1: 30.0,
            tier2: 36.6,
            tier3: 40.69,
            fuel_adjustment: 4.80,
            renewable_surcharge: 3.49,
        }
    }
}

/// Solar installation parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolarConfig {
    /// Installed panel capacity (kW).
    pub panel_kw: f64,
    /// Assumed monthly generation (kWh).
    pub monthly_generation_kwh: f64,
    /// Share of generation consumable directly during the day (%, 0-100).
    pub day_self_consumption_pct: f64,
    /// Export price for surplus generation (yen/kWh).
    pub sell_price_per_kwh: f64,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            panel_kw: 5.5,
            monthly_generation_kwh: 450.0,
            day_self_consumption_pct: 35.0,
            sell_price_per_kwh: 16.0,
        }
    }
}

/// Battery storage parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Usable battery capacity (kWh); zero disables night coverage.
    pub usable_capacity_kwh: f64,
    /// Round-trip efficiency (0.0-1.0).
    pub efficiency: f64,
    /// Full charge cycles per month.
    pub cycles_per_month: f64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            usable_capacity_kwh: 9.8,
            efficiency: 0.88,
            cycles_per_month: 30.0,
        }
    }
}

/// Household usage profile parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HouseholdConfig {
    /// Fraction of monthly usage that falls during the day (0.0-1.0).
    pub day_usage_share: f64,
}

impl Default for HouseholdConfig {
    fn default() -> Self {
        Self {
            day_usage_share: 0.30,
        }
    }
}

/// Long-horizon projection parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectionConfig {
    /// Projection horizon in years (must be > 0).
    pub years: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self { years: 25 }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.efficiency"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: a 30 A household with a 5.5 kW array
    /// and a 9.8 kWh battery.
    pub fn baseline() -> Self {
        Self {
            billing: BillingConfig::default(),
            rates: RatesConfig::default(),
            solar: SolarConfig::default(),
            battery: BatteryConfig::default(),
            household: HouseholdConfig::default(),
            projection: ProjectionConfig::default(),
        }
    }

    /// Returns the no-battery preset: a small panel-only installation on a
    /// lighter bill.
    pub fn no_battery() -> Self {
        Self {
            billing: BillingConfig {
                monthly_bill: 9_000.0,
                ..BillingConfig::default()
            },
            solar: SolarConfig {
                panel_kw: 3.2,
                monthly_generation_kwh: 280.0,
                ..SolarConfig::default()
            },
            battery: BatteryConfig {
                usable_capacity_kwh: 0.0,
                ..BatteryConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the all-electric preset: a 60 A contract with a large array
    /// and battery sized for heavy usage.
    pub fn all_electric() -> Self {
        Self {
            billing: BillingConfig {
                monthly_bill: 28_000.0,
                contracted_amperage: 60,
            },
            solar: SolarConfig {
                panel_kw: 9.9,
                monthly_generation_kwh: 820.0,
                day_self_consumption_pct: 45.0,
                ..SolarConfig::default()
            },
            battery: BatteryConfig {
                usable_capacity_kwh: 16.4,
                ..BatteryConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "no_battery", "all_electric"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "no_battery" => Ok(Self::no_battery()),
            "all_electric" => Ok(Self::all_electric()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", expected one of: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Checks every section against its range constraints and returns the
    /// violations found.
    ///
    /// An empty vector means the scenario is ready to run.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let b = &self.billing;
        if b.monthly_bill < 0.0 {
            errors.push(ConfigError {
                field: "billing.monthly_bill".into(),
                message: "must be >= 0".into(),
            });
        }
        if !CONTRACT_AMPERAGES.contains(&b.contracted_amperage) {
            errors.push(ConfigError {
                field: "billing.contracted_amperage".into(),
                message: format!(
                    "must be one of {}, got {}",
                    CONTRACT_AMPERAGES.map(|a| a.to_string()).join(", "),
                    b.contracted_amperage
                ),
            });
        }

        let r = &self.rates;
        let adjustment = r.fuel_adjustment + r.renewable_surcharge;
        for (field, nominal) in [
            ("rates.tier1", r.tier1),
            ("rates.tier2", r.tier2),
            ("rates.tier3", r.tier3),
        ] {
            if nominal + adjustment <= 0.0 {
                errors.push(ConfigError {
                    field: field.into(),
                    message: format!(
                        "effective rate must be > 0 after adjustments, got {:.2}",
                        nominal + adjustment
                    ),
                });
            }
        }

        let sol = &self.solar;
        if sol.panel_kw < 0.0 {
            errors.push(ConfigError {
                field: "solar.panel_kw".into(),
                message: "must be >= 0".into(),
            });
        }
        if sol.monthly_generation_kwh < 0.0 {
            errors.push(ConfigError {
                field: "solar.monthly_generation_kwh".into(),
                message: "must be >= 0".into(),
            });
        }
        if !(0.0..=100.0).contains(&sol.day_self_consumption_pct) {
            errors.push(ConfigError {
                field: "solar.day_self_consumption_pct".into(),
                message: "must be in [0.0, 100.0]".into(),
            });
        }
        if sol.sell_price_per_kwh < 0.0 {
            errors.push(ConfigError {
                field: "solar.sell_price_per_kwh".into(),
                message: "must be >= 0".into(),
            });
        }

        let bat = &self.battery;
        if bat.usable_capacity_kwh < 0.0 {
            errors.push(ConfigError {
                field: "battery.usable_capacity_kwh".into(),
                message: "must be >= 0".into(),
            });
        }
        if !(bat.efficiency > 0.0 && bat.efficiency <= 1.0) {
            errors.push(ConfigError {
                field: "battery.efficiency".into(),
                message: "must be in (0.0, 1.0]".into(),
            });
        }
        if bat.cycles_per_month < 0.0 {
            errors.push(ConfigError {
                field: "battery.cycles_per_month".into(),
                message: "must be >= 0".into(),
            });
        }

        if !(0.0..=1.0).contains(&self.household.day_usage_share) {
            errors.push(ConfigError {
                field: "household.day_usage_share".into(),
                message: "must be in [0.0, 1.0]".into(),
            });
        }

        if self.projection.years == 0 {
            errors.push(ConfigError {
                field: "projection.years".into(),
                message: "must be > 0".into(),
            });
        }

        errors
    }
}
