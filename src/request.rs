use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a form choice with a stable identifier and a display label.
macro_rules! choice {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => ($id:literal, $label:literal)),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $id)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $id,)+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| {
                        let options: Vec<&str> = $name::ALL.iter().map(|c| c.as_str()).collect();
                        format!("'{}' is not one of: {}", s, options.join(", "))
                    })
            }
        }
    };
}

choice! {
    Region {
        Seoul => ("seoul", "Seoul (never leave the subway station)"),
        Busan => ("busan", "Busan (a quick look at the sea)"),
        Jeju => ("jeju", "Jeju (big parking lots only)"),
        Gangneung => ("gangneung", "Gangneung (shortest beach walk)"),
        Jeonju => ("jeonju", "Jeonju (hanok village right at the door)"),
        Gyeongju => ("gyeongju", "Gyeongju (glued to Hwangnidan-gil)"),
        Incheon => ("incheon", "Incheon (airport area / Songdo)"),
        Sokcho => ("sokcho", "Sokcho (central market feast)"),
        Yeosu => ("yeosu", "Yeosu (night sea from the hotel)"),
        Overseas => ("overseas", "Overseas (the nearest neighbouring country)"),
    }
}

choice! {
    TravelStyle {
        Hermit => ("hermit", "Homebody (the room is the destination)"),
        Efficiency => ("efficiency", "Value for money (experiences first)"),
        Status => ("status", "For the feed (aesthetics first)"),
        Wellness => ("wellness", "Wellness (healing first)"),
    }
}

choice! {
    TransportMode {
        Car => ("car", "Car / taxi (dropped at the door)"),
        Public => ("public", "Public transport (station-area only)"),
    }
}

choice! {
    TripDuration {
        DayTrip => ("day-trip", "Day trip"),
        OneNight => ("one-night", "2 days, 1 night"),
        TwoNights => ("two-nights", "3 days, 2 nights"),
    }
}

choice! {
    Budget {
        Under100k => ("under-100k", "Under 100,000 KRW"),
        Around200k => ("200k", "Around 200,000 KRW"),
        Around300k => ("300k", "Around 300,000 KRW"),
        Unlimited => ("unlimited", "Luxury (no limit)"),
    }
}

choice! {
    Participants {
        Solo => ("solo", "1 person (perfect solitude)"),
        Small => ("small", "2-3 people (a select few)"),
        Large => ("large", "4 or more (group / family)"),
    }
}

pub const MIN_LAZINESS: u8 = 1;
pub const MAX_LAZINESS: u8 = 5;

const LAZINESS_LABELS: [&str; 5] = [
    "Slightly bothered",
    "Very bothered",
    "Moving might kill me",
    "One with the bed",
    "Only my soul is travelling",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// Preferences collected before asking for an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelRequest {
    pub region: Region,
    pub duration: TripDuration,
    pub style: TravelStyle,
    pub budget: Budget,
    pub transport: TransportMode,
    pub participants: Participants,
    pub include_food: bool,
    /// 1-5, higher means less movement
    pub laziness_level: u8,
    pub location: Option<LatLng>,
}

impl Default for TravelRequest {
    fn default() -> Self {
        TravelRequest {
            region: Region::Seoul,
            duration: TripDuration::DayTrip,
            style: TravelStyle::Hermit,
            budget: Budget::Under100k,
            transport: TransportMode::Public,
            participants: Participants::Solo,
            include_food: true,
            laziness_level: 4,
            location: None,
        }
    }
}

impl TravelRequest {
    /// Laziness level clamped into the supported range.
    pub fn laziness(&self) -> u8 {
        self.laziness_level.clamp(MIN_LAZINESS, MAX_LAZINESS)
    }

    pub fn laziness_label(&self) -> &'static str {
        LAZINESS_LABELS[(self.laziness() - MIN_LAZINESS) as usize]
    }

    pub fn is_public_transport(&self) -> bool {
        self.transport == TransportMode::Public
    }
}
