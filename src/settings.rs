use std::str::FromStr;

use crate::error::GreeError;

pub const MIN_TEMP: i64 = 0;
pub const MAX_TEMP: i64 = 30;

pub const MIN_FAN_SPEED: i64 = 0;
pub const MAX_FAN_SPEED: i64 = 5;

pub const MIN_SWING: i64 = 0;
pub const MAX_SWING: i64 = 11;

/// Operating mode (`Mod` on the wire).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Auto,
    Cool,
    Dry,
    Fan,
    Heat,
}

impl Mode {
    #[must_use]
    pub const fn wire_value(self) -> i64 {
        match self {
            Self::Auto => 0,
            Self::Cool => 1,
            Self::Dry => 2,
            Self::Fan => 3,
            Self::Heat => 4,
        }
    }
}

impl FromStr for Mode {
    type Err = GreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "cool" => Ok(Self::Cool),
            "dry" => Ok(Self::Dry),
            "fan" => Ok(Self::Fan),
            "heat" => Ok(Self::Heat),
            other => Err(GreeError::InvalidConfigValue {
                field: "Mod",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<i64> for Mode {
    type Error = GreeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Auto),
            1 => Ok(Self::Cool),
            2 => Ok(Self::Dry),
            3 => Ok(Self::Fan),
            4 => Ok(Self::Heat),
            other => Err(GreeError::InvalidConfigValue {
                field: "Mod",
                value: other.to_string(),
            }),
        }
    }
}

/// Temperature unit (`TemUn` on the wire): 0 = Celsius, 1 = Fahrenheit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    #[must_use]
    pub const fn wire_value(self) -> i64 {
        match self {
            Self::Celsius => 0,
            Self::Fahrenheit => 1,
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = GreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "c" => Ok(Self::Celsius),
            "f" => Ok(Self::Fahrenheit),
            other => Err(GreeError::InvalidConfigValue {
                field: "TemUn",
                value: other.to_string(),
            }),
        }
    }
}

/// Ordered set of pending setting writes for one command packet.
///
/// Keys are the wire field names (`Pow`, `SetTem`, ...) and the order is
/// insertion order: the command payload's `opt`/`p` arrays come out in
/// exactly the order the setters were called. Re-setting a field updates it
/// in place without moving it. Setters validate before writing, so a failed
/// call leaves the mapping untouched.
#[derive(Clone, Debug, Default)]
pub struct CommandConfig {
    fields: Vec<(&'static str, i64)>,
}

impl CommandConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_power(&mut self, on: bool) {
        self.insert("Pow", i64::from(on));
    }

    /// Set the target temperature, writing `TemUn` then `SetTem`.
    ///
    /// # Errors
    ///
    /// Returns `GreeError::InvalidConfigValue` when `temp` is outside
    /// 0..=30; nothing is written in that case.
    pub fn set_temperature(&mut self, temp: i64, unit: TemperatureUnit) -> Result<(), GreeError> {
        if !(MIN_TEMP..=MAX_TEMP).contains(&temp) {
            return Err(GreeError::InvalidConfigValue {
                field: "SetTem",
                value: temp.to_string(),
            });
        }
        self.insert("TemUn", unit.wire_value());
        self.insert("SetTem", temp);
        Ok(())
    }

    /// Fractional temperatures are truncated toward zero before validation,
    /// matching the vendor app's behavior.
    pub fn set_temperature_f(&mut self, temp: f64, unit: TemperatureUnit) -> Result<(), GreeError> {
        self.set_temperature(temp.trunc() as i64, unit)
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.insert("Mod", mode.wire_value());
    }

    /// # Errors
    ///
    /// Returns `GreeError::InvalidConfigValue` when `speed` is outside 0..=5.
    pub fn set_fan_speed(&mut self, speed: i64) -> Result<(), GreeError> {
        if !(MIN_FAN_SPEED..=MAX_FAN_SPEED).contains(&speed) {
            return Err(GreeError::InvalidConfigValue {
                field: "WdSpd",
                value: speed.to_string(),
            });
        }
        self.insert("WdSpd", speed);
        Ok(())
    }

    /// Vertical louver setting (`SwUpDn`):
    /// 0 default, 1 full-range swing, 2..=6 fixed positions from top (1/5)
    /// to bottom (5/5), 7..=11 regional swing from bottom (5/5) to top (1/5).
    ///
    /// # Errors
    ///
    /// Returns `GreeError::InvalidConfigValue` when `swing` is outside 0..=11.
    pub fn set_swing(&mut self, swing: i64) -> Result<(), GreeError> {
        if !(MIN_SWING..=MAX_SWING).contains(&swing) {
            return Err(GreeError::InvalidConfigValue {
                field: "SwUpDn",
                value: swing.to_string(),
            });
        }
        self.insert("SwUpDn", swing);
        Ok(())
    }

    pub fn set_quiet(&mut self, on: bool) {
        self.insert("Quiet", i64::from(on));
    }

    pub fn set_turbo(&mut self, on: bool) {
        self.insert("Tur", i64::from(on));
    }

    pub fn set_energy_saving(&mut self, on: bool) {
        self.insert("SvSt", i64::from(on));
    }

    /// Front-panel display light.
    pub fn set_display(&mut self, on: bool) {
        self.insert("Lig", i64::from(on));
    }

    pub fn set_health(&mut self, on: bool) {
        self.insert("Health", i64::from(on));
    }

    pub fn set_blow(&mut self, on: bool) {
        self.insert("Blo", i64::from(on));
    }

    pub fn set_air_valve(&mut self, on: bool) {
        self.insert("Air", i64::from(on));
    }

    /// Raw read-back by wire field name. `None` means the field was never
    /// set, distinct from a stored 0.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<i64> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| *value)
    }

    #[must_use]
    pub fn power(&self) -> Option<bool> {
        self.get("Pow").map(|v| v != 0)
    }

    #[must_use]
    pub fn temperature(&self) -> Option<i64> {
        self.get("SetTem")
    }

    #[must_use]
    pub fn temperature_unit(&self) -> Option<TemperatureUnit> {
        self.get("TemUn").map(|v| {
            if v == 0 {
                TemperatureUnit::Celsius
            } else {
                TemperatureUnit::Fahrenheit
            }
        })
    }

    #[must_use]
    pub fn mode(&self) -> Option<Mode> {
        self.get("Mod").and_then(|v| Mode::try_from(v).ok())
    }

    #[must_use]
    pub fn fan_speed(&self) -> Option<i64> {
        self.get("WdSpd")
    }

    #[must_use]
    pub fn swing(&self) -> Option<i64> {
        self.get("SwUpDn")
    }

    #[must_use]
    pub fn quiet(&self) -> Option<bool> {
        self.get("Quiet").map(|v| v != 0)
    }

    #[must_use]
    pub fn turbo(&self) -> Option<bool> {
        self.get("Tur").map(|v| v != 0)
    }

    #[must_use]
    pub fn energy_saving(&self) -> Option<bool> {
        self.get("SvSt").map(|v| v != 0)
    }

    #[must_use]
    pub fn display(&self) -> Option<bool> {
        self.get("Lig").map(|v| v != 0)
    }

    #[must_use]
    pub fn health(&self) -> Option<bool> {
        self.get("Health").map(|v| v != 0)
    }

    #[must_use]
    pub fn blow(&self) -> Option<bool> {
        self.get("Blo").map(|v| v != 0)
    }

    #[must_use]
    pub fn air_valve(&self) -> Option<bool> {
        self.get("Air").map(|v| v != 0)
    }

    /// Wire field names in insertion order (the command `opt` array).
    #[must_use]
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(name, _)| *name).collect()
    }

    /// Field values parallel to `field_names` (the command `p` array).
    #[must_use]
    pub fn field_values(&self) -> Vec<i64> {
        self.fields.iter().map(|(_, value)| *value).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    fn insert(&mut self, field: &'static str, value: i64) {
        if let Some(slot) = self.fields.iter_mut().find(|(name, _)| *name == field) {
            slot.1 = value;
        } else {
            self.fields.push((field, value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_toggles_round_trip() {
        let mut config = CommandConfig::new();
        config.set_power(true);
        config.set_quiet(false);
        config.set_turbo(true);
        config.set_energy_saving(false);
        config.set_display(true);
        config.set_health(false);
        config.set_blow(true);
        config.set_air_valve(false);
        assert_eq!(config.get("Pow"), Some(1));
        assert_eq!(config.get("Quiet"), Some(0));
        assert_eq!(config.power(), Some(true));
        assert_eq!(config.quiet(), Some(false));
        assert_eq!(config.turbo(), Some(true));
        assert_eq!(config.energy_saving(), Some(false));
        assert_eq!(config.display(), Some(true));
        assert_eq!(config.health(), Some(false));
        assert_eq!(config.blow(), Some(true));
        assert_eq!(config.air_valve(), Some(false));
    }

    #[test]
    fn unset_fields_read_back_as_none() {
        let config = CommandConfig::new();
        assert_eq!(config.power(), None);
        assert_eq!(config.temperature(), None);
        assert_eq!(config.get("Pow"), None);
        assert!(config.is_empty());
    }

    #[test]
    fn temperature_in_range_writes_unit_and_value() {
        for temp in [MIN_TEMP, 24, MAX_TEMP] {
            let mut config = CommandConfig::new();
            config
                .set_temperature(temp, TemperatureUnit::Celsius)
                .expect("in-range temperature");
            assert_eq!(config.get("SetTem"), Some(temp));
            assert_eq!(config.get("TemUn"), Some(0));
        }
        let mut config = CommandConfig::new();
        config
            .set_temperature(20, TemperatureUnit::Fahrenheit)
            .expect("in-range temperature");
        assert_eq!(config.get("TemUn"), Some(1));
    }

    #[test]
    fn temperature_out_of_range_leaves_mapping_unchanged() {
        for temp in [MIN_TEMP - 1, MAX_TEMP + 1] {
            let mut config = CommandConfig::new();
            let err = config
                .set_temperature(temp, TemperatureUnit::Celsius)
                .expect_err("out-of-range temperature");
            assert!(matches!(
                err,
                GreeError::InvalidConfigValue { field: "SetTem", .. }
            ));
            assert!(config.is_empty(), "mapping must be untouched on error");
        }
    }

    #[test]
    fn fractional_temperature_is_truncated() {
        let mut config = CommandConfig::new();
        config
            .set_temperature_f(24.7, TemperatureUnit::Celsius)
            .expect("truncates to 24");
        assert_eq!(config.temperature(), Some(24));
    }

    #[test]
    fn fan_speed_bounds() {
        for speed in MIN_FAN_SPEED..=MAX_FAN_SPEED {
            let mut config = CommandConfig::new();
            config.set_fan_speed(speed).expect("in-range speed");
            assert_eq!(config.fan_speed(), Some(speed));
        }
        for speed in [MIN_FAN_SPEED - 1, MAX_FAN_SPEED + 1] {
            let mut config = CommandConfig::new();
            assert!(config.set_fan_speed(speed).is_err());
            assert!(config.is_empty());
        }
    }

    #[test]
    fn swing_bounds() {
        for swing in MIN_SWING..=MAX_SWING {
            let mut config = CommandConfig::new();
            config.set_swing(swing).expect("in-range swing");
            assert_eq!(config.swing(), Some(swing));
        }
        for swing in [MIN_SWING - 1, MAX_SWING + 1] {
            let mut config = CommandConfig::new();
            assert!(config.set_swing(swing).is_err());
            assert!(config.is_empty());
        }
    }

    #[test]
    fn mode_resolves_from_name_and_wire_value() {
        assert_eq!("cool".parse::<Mode>().expect("known mode"), Mode::Cool);
        assert_eq!(Mode::try_from(4).expect("known value"), Mode::Heat);
        assert!("freeze".parse::<Mode>().is_err());
        assert!(Mode::try_from(5).is_err());

        let mut config = CommandConfig::new();
        config.set_mode(Mode::Dry);
        assert_eq!(config.get("Mod"), Some(2));
        assert_eq!(config.mode(), Some(Mode::Dry));
    }

    #[test]
    fn unit_parses_c_or_f_only() {
        assert_eq!(
            "c".parse::<TemperatureUnit>().expect("celsius"),
            TemperatureUnit::Celsius
        );
        assert_eq!(
            "f".parse::<TemperatureUnit>().expect("fahrenheit"),
            TemperatureUnit::Fahrenheit
        );
        assert!(matches!(
            "k".parse::<TemperatureUnit>(),
            Err(GreeError::InvalidConfigValue { field: "TemUn", .. })
        ));
    }

    #[test]
    fn opt_order_is_insertion_order() {
        let mut config = CommandConfig::new();
        config.set_power(true);
        config
            .set_temperature(24, TemperatureUnit::Celsius)
            .expect("in-range temperature");
        assert_eq!(config.field_names(), vec!["Pow", "TemUn", "SetTem"]);
        assert_eq!(config.field_values(), vec![1, 0, 24]);
    }

    #[test]
    fn resetting_a_field_keeps_its_position() {
        let mut config = CommandConfig::new();
        config.set_power(true);
        config.set_fan_speed(3).expect("in-range speed");
        config.set_power(false);
        assert_eq!(config.field_names(), vec!["Pow", "WdSpd"]);
        assert_eq!(config.field_values(), vec![0, 3]);
        assert_eq!(config.len(), 2);
    }
}
