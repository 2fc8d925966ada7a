//! Day-by-day walk through a sector with textual alarms.

use std::fmt;

use serde::Serialize;
use sunshade_attitude::{Orientation, SectorConstraints, SunAngles};

/// Condition flagged on a single day of the sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alarm {
    SunOnMinusX,
    SunBeyondYLimit,
    SunAboveSunshade,
}

impl Alarm {
    pub fn label(&self) -> &'static str {
        match self {
            Alarm::SunOnMinusX => "Sun on -X",
            Alarm::SunBeyondYLimit => "Sun > Y angle limit",
            Alarm::SunAboveSunshade => "Sun above sunshade",
        }
    }
}

/// Angles and alarms for one day offset from sector middle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayReport {
    pub day: i32,
    pub orientation: Orientation,
    pub angles: SunAngles,
    pub alarms: Vec<Alarm>,
}

impl DayReport {
    pub fn has(&self, alarm: Alarm) -> bool {
        self.alarms.contains(&alarm)
    }

    fn slot(&self, alarm: Alarm) -> &'static str {
        if self.has(alarm) { alarm.label() } else { "" }
    }
}

impl fmt::Display for DayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:3} {:2} {:6.2} {:6.2} {} {} {}",
            self.day,
            self.angles.sign_x,
            self.angles.sun_angle_deg,
            self.angles.sun_angle_sc_deg,
            self.slot(Alarm::SunOnMinusX),
            self.slot(Alarm::SunBeyondYLimit),
            self.slot(Alarm::SunAboveSunshade),
        )
    }
}

/// Alarms raised by one set of angles.
///
/// Comparisons are strict, so a Sun sitting exactly on a limit raises no
/// alarm here even though the allowability check rejects it.
pub fn alarms_for(angles: &SunAngles, constraints: &SectorConstraints) -> Vec<Alarm> {
    let mut alarms = Vec::new();
    if angles.sign_x < 0 {
        alarms.push(Alarm::SunOnMinusX);
    }
    if angles.sun_angle_sc_deg > constraints.y_limit_deg {
        alarms.push(Alarm::SunBeyondYLimit);
    }
    if angles.sun_angle_deg > constraints.sunshade_limit_deg {
        alarms.push(Alarm::SunAboveSunshade);
    }
    alarms
}

/// Report every integer day from `-half_sector_days` to `+half_sector_days`.
pub fn check_range(orientation: &Orientation, constraints: &SectorConstraints) -> Vec<DayReport> {
    let evaluator = constraints.evaluator();
    let half = i32::try_from(constraints.half_sector_days).unwrap_or(i32::MAX);
    (-half..=half)
        .map(|day| {
            let shifted = orientation.shifted(f64::from(day));
            let angles = evaluator.evaluate(&shifted);
            DayReport {
                day,
                orientation: shifted,
                alarms: alarms_for(&angles, constraints),
                angles,
            }
        })
        .collect()
}

/// Roll-up of a day-range report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeSummary {
    pub days: usize,
    pub alarmed_days: usize,
    pub first_alarm_day: Option<i32>,
}

impl RangeSummary {
    pub fn from_reports(reports: &[DayReport]) -> Self {
        let mut alarmed = reports.iter().filter(|r| !r.alarms.is_empty());
        let first_alarm_day = alarmed.next().map(|r| r.day);
        let alarmed_days = first_alarm_day.map(|_| 1 + alarmed.count()).unwrap_or(0);
        Self {
            days: reports.len(),
            alarmed_days,
            first_alarm_day,
        }
    }

    pub fn is_clear(&self) -> bool {
        self.alarmed_days == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_every_day_of_the_sector() {
        let reports = check_range(
            &Orientation::new(2.0, 30.0, 0.0),
            &SectorConstraints::default(),
        );
        assert_eq!(reports.len(), 29);
        assert_eq!(reports.first().map(|r| r.day), Some(-14));
        assert_eq!(reports.last().map(|r| r.day), Some(14));
        assert_eq!(reports[0].orientation.dlong_deg, -12.0);
        assert_eq!(reports[28].orientation.dlong_deg, 16.0);
    }

    #[test]
    fn clean_pointing_formats_without_alarms() {
        let reports = check_range(
            &Orientation::new(0.0, 30.0, 0.0),
            &SectorConstraints::default(),
        );
        let summary = RangeSummary::from_reports(&reports);
        assert!(summary.is_clear());
        assert_eq!(summary.first_alarm_day, None);

        let middle = &reports[14];
        assert_eq!(middle.day, 0);
        assert_eq!(middle.to_string(), "  0  1 -60.00   0.00   ");
    }

    #[test]
    fn sunshade_alarm_fires_at_sector_ends() {
        let reports = check_range(
            &Orientation::new(0.0, 84.9, 0.0),
            &SectorConstraints::default(),
        );
        assert!(reports[0].has(Alarm::SunAboveSunshade));
        assert!(reports[28].has(Alarm::SunAboveSunshade));
        assert!(reports[14].alarms.is_empty());

        let line = reports[0].to_string();
        assert!(line.starts_with("-14  1  -4.95  14.00"), "{line}");
        assert!(line.ends_with("Sun above sunshade"), "{line}");

        let summary = RangeSummary::from_reports(&reports);
        assert_eq!(summary.first_alarm_day, Some(-14));
        assert!(summary.alarmed_days >= 2 && summary.alarmed_days < 29);
    }

    #[test]
    fn all_three_alarms_render_in_slot_order() {
        // Sun well above the sunshade, on -X, and far off in Y.
        let angles = SunAngles {
            sign_x: -1,
            sun_angle_deg: 10.0,
            sun_angle_sc_deg: 40.0,
        };
        let alarms = alarms_for(&angles, &SectorConstraints::default());
        assert_eq!(
            alarms,
            vec![
                Alarm::SunOnMinusX,
                Alarm::SunBeyondYLimit,
                Alarm::SunAboveSunshade
            ]
        );
        let report = DayReport {
            day: 3,
            orientation: Orientation::new(3.0, 0.0, 0.0),
            angles,
            alarms,
        };
        assert_eq!(
            report.to_string(),
            "  3 -1  10.00  40.00 Sun on -X Sun > Y angle limit Sun above sunshade"
        );
    }

    #[test]
    fn limits_are_strict_for_alarms() {
        let constraints = SectorConstraints::default();
        let on_limits = SunAngles {
            sign_x: 0,
            sun_angle_deg: constraints.sunshade_limit_deg,
            sun_angle_sc_deg: constraints.y_limit_deg,
        };
        assert!(alarms_for(&on_limits, &constraints).is_empty());
    }
}
