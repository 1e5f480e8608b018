//! Status enums for shops, barbers and queue entries.

use serde::{Deserialize, Serialize};

/// Whether a shop is accepting customers into its queue.
///
/// Shops that never had a status set are treated as closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShopStatus {
    /// Accepting customers.
    Open,
    /// Not accepting customers.
    #[default]
    Close,
    /// Queue kept as-is, no new customers.
    Frozen,
}

impl ShopStatus {
    /// The status the freeze control switches to: a frozen shop reopens,
    /// anything else freezes.
    #[must_use]
    pub const fn toggled_freeze(self) -> Self {
        match self {
            Self::Frozen => Self::Open,
            Self::Open | Self::Close => Self::Frozen,
        }
    }
}

impl std::fmt::Display for ShopStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Close => write!(f, "close"),
            Self::Frozen => write!(f, "frozen"),
        }
    }
}

impl std::str::FromStr for ShopStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "close" | "closed" => Ok(Self::Close),
            "frozen" | "freeze" => Ok(Self::Frozen),
            _ => Err(format!("invalid shop status: {s}")),
        }
    }
}

/// Availability of a barber (staff member).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BarberStatus {
    /// Taking customers.
    #[default]
    #[serde(rename = "active")]
    Active,
    /// Temporarily away.
    #[serde(rename = "On Break")]
    OnBreak,
    /// Not working today.
    #[serde(rename = "Off Today")]
    OffToday,
}

impl BarberStatus {
    /// Every status, in the order the roster filters show them.
    pub const ALL: [Self; 3] = [Self::Active, Self::OnBreak, Self::OffToday];
}

impl std::fmt::Display for BarberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::OnBreak => write!(f, "On Break"),
            Self::OffToday => write!(f, "Off Today"),
        }
    }
}

impl std::str::FromStr for BarberStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "onbreak" | "break" => Ok(Self::OnBreak),
            "offtoday" | "off" => Ok(Self::OffToday),
            _ => Err(format!("invalid barber status: {s}")),
        }
    }
}

/// Lifecycle state of a customer in a shop's queue.
///
/// Only `waiting` and `completed` drive dashboard counters; anything else the
/// backend reports is kept as [`QueueEntryStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueEntryStatus {
    Waiting,
    Completed,
    #[serde(other)]
    Other,
}

impl std::fmt::Display for QueueEntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::Completed => write!(f, "completed"),
            Self::Other => write!(f, "other"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shop_status_wire_names() {
        assert_eq!(serde_json::to_string(&ShopStatus::Close).unwrap(), "\"close\"");
        assert_eq!(
            serde_json::from_str::<ShopStatus>("\"frozen\"").unwrap(),
            ShopStatus::Frozen
        );
    }

    #[test]
    fn test_toggled_freeze() {
        assert_eq!(ShopStatus::Frozen.toggled_freeze(), ShopStatus::Open);
        assert_eq!(ShopStatus::Open.toggled_freeze(), ShopStatus::Frozen);
        assert_eq!(ShopStatus::Close.toggled_freeze(), ShopStatus::Frozen);
    }

    #[test]
    fn test_barber_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&BarberStatus::OnBreak).unwrap(),
            "\"On Break\""
        );
        assert_eq!(
            serde_json::from_str::<BarberStatus>("\"Off Today\"").unwrap(),
            BarberStatus::OffToday
        );
    }

    #[test]
    fn test_barber_status_from_cli_input() {
        assert_eq!("on-break".parse::<BarberStatus>().unwrap(), BarberStatus::OnBreak);
        assert_eq!("Off Today".parse::<BarberStatus>().unwrap(), BarberStatus::OffToday);
        assert!("sleeping".parse::<BarberStatus>().is_err());
    }

    #[test]
    fn test_unknown_queue_status_is_other() {
        assert_eq!(
            serde_json::from_str::<QueueEntryStatus>("\"in_service\"").unwrap(),
            QueueEntryStatus::Other
        );
    }
}
