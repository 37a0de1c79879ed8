//! Admin analytics payloads.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::project::{clamp_progression, ProjectStatus};
use super::user::{RawUserRef, UserRef};
use super::wire::{lenient_f64, parse_date, FromWire};

/// Headline counters of the analytics page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsOverview {
    #[serde(alias = "nbProjets")]
    pub total_projects: u32,
    #[serde(alias = "projetsActifs", alias = "projectsInProgress")]
    pub active_projects: u32,
    #[serde(alias = "projetsTermines")]
    pub completed_projects: u32,
    #[serde(alias = "nbTaches")]
    pub total_tasks: u32,
    #[serde(alias = "tachesTerminees")]
    pub completed_tasks: u32,
    #[serde(alias = "tachesEnRetard")]
    pub overdue_tasks: u32,
    #[serde(alias = "nbUtilisateurs")]
    pub total_users: u32,
    #[serde(alias = "utilisateursActifs")]
    pub active_users: u32,
    #[serde(alias = "progressionMoyenne", alias = "averageProgress")]
    pub average_progression: f64,
}

impl AnalyticsOverview {
    pub fn task_completion(&self) -> u8 {
        if self.total_tasks == 0 {
            return 0;
        }
        clamp_progression(f64::from(self.completed_tasks) * 100.0 / f64::from(self.total_tasks))
    }
}

impl FromWire for AnalyticsOverview {
    type Raw = AnalyticsOverview;

    fn from_wire(mut raw: AnalyticsOverview) -> Result<Self, String> {
        raw.average_progression = f64::from(clamp_progression(raw.average_progression));
        Ok(raw)
    }
}

/// Number of projects in one status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: ProjectStatus,
    pub count: u32,
}

/// The breakdown arrives either as `{ "EN_COURS": 3, ... }` or as a list of
/// `{ status, count }` rows.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawStatusBreakdown {
    Rows(Vec<RawStatusRow>),
    Map(BTreeMap<String, u32>),
}

#[derive(Debug, Deserialize)]
pub struct RawStatusRow {
    #[serde(alias = "statut", alias = "label")]
    pub status: String,
    #[serde(alias = "total", alias = "nombre", alias = "value")]
    pub count: u32,
}

/// Wrapper giving the breakdown list a `FromWire` implementation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusBreakdown(pub Vec<StatusCount>);

impl FromWire for StatusBreakdown {
    type Raw = RawStatusBreakdown;

    fn from_wire(raw: RawStatusBreakdown) -> Result<Self, String> {
        let pairs: Vec<(String, u32)> = match raw {
            RawStatusBreakdown::Rows(rows) => rows.into_iter().map(|r| (r.status, r.count)).collect(),
            RawStatusBreakdown::Map(map) => map.into_iter().collect(),
        };
        let mut counts: Vec<StatusCount> = ProjectStatus::ALL
            .iter()
            .map(|status| StatusCount { status: *status, count: 0 })
            .collect();
        for (label, count) in pairs {
            match label.parse::<ProjectStatus>() {
                Ok(status) => {
                    if let Some(slot) = counts.iter_mut().find(|c| c.status == status) {
                        slot.count += count;
                    }
                }
                Err(e) => tracing::warn!("analytics breakdown: {e}"),
            }
        }
        Ok(StatusBreakdown(counts))
    }
}

/// One day of the task trend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub created: u32,
    pub completed: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrendPoint {
    #[serde(alias = "jour", alias = "day")]
    pub date: Value,
    #[serde(default, alias = "creees", alias = "createdTasks")]
    pub created: u32,
    #[serde(default, alias = "terminees", alias = "completedTasks", alias = "count")]
    pub completed: u32,
}

/// Trend sorted by date, unparsable days dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trend(pub Vec<TrendPoint>);

impl Trend {
    pub fn completed_series(&self) -> Vec<f64> {
        self.0.iter().map(|p| f64::from(p.completed)).collect()
    }

    pub fn created_series(&self) -> Vec<f64> {
        self.0.iter().map(|p| f64::from(p.created)).collect()
    }
}

impl FromWire for Trend {
    type Raw = Vec<RawTrendPoint>;

    fn from_wire(raw: Vec<RawTrendPoint>) -> Result<Self, String> {
        let mut points: Vec<TrendPoint> = raw
            .into_iter()
            .filter_map(|p| {
                Some(TrendPoint {
                    date: parse_date(&p.date)?,
                    created: p.created,
                    completed: p.completed,
                })
            })
            .collect();
        points.sort_by_key(|p| p.date);
        Ok(Trend(points))
    }
}

/// Open work assigned to one developer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Workload {
    pub developer: UserRef,
    pub open_tasks: u32,
    pub planned_hours: f64,
    pub effective_hours: f64,
}

impl Workload {
    /// Effective over planned hours, clamped for display.
    pub fn load_percent(&self) -> u8 {
        if self.planned_hours <= 0.0 {
            return 0;
        }
        clamp_progression(self.effective_hours * 100.0 / self.planned_hours)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWorkload {
    #[serde(alias = "developpeur", alias = "user")]
    pub developer: Option<RawUserRef>,
    #[serde(alias = "developpeurId", alias = "userId")]
    pub developer_id: Option<i64>,
    #[serde(alias = "nom", alias = "developerName")]
    pub name: Option<String>,
    #[serde(default, alias = "tachesOuvertes", alias = "openTaskCount")]
    pub open_tasks: u32,
    #[serde(alias = "heuresPlanifiees")]
    pub planned_hours: Option<Value>,
    #[serde(alias = "heuresEffectives")]
    pub effective_hours: Option<Value>,
}

impl FromWire for Workload {
    type Raw = RawWorkload;

    fn from_wire(raw: RawWorkload) -> Result<Self, String> {
        let developer = raw
            .developer
            .and_then(RawUserRef::normalize)
            .or_else(|| {
                raw.developer_id.map(|id| UserRef {
                    id,
                    name: raw.name.clone().unwrap_or_else(|| format!("#{id}")),
                })
            })
            .ok_or("workload row without developer")?;
        Ok(Workload {
            developer,
            open_tasks: raw.open_tasks,
            planned_hours: lenient_f64(&raw.planned_hours).unwrap_or(0.0).max(0.0),
            effective_hours: lenient_f64(&raw.effective_hours).unwrap_or(0.0).max(0.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_breakdown_from_map_and_rows() {
        let map: RawStatusBreakdown =
            serde_json::from_value(json!({ "EN_COURS": 3, "TERMINE": 1, "ARCHIVE": 9 })).unwrap();
        let breakdown = StatusBreakdown::from_wire(map).unwrap();
        assert_eq!(breakdown.0.len(), 4);
        assert_eq!(breakdown.0[0], StatusCount { status: ProjectStatus::InProgress, count: 3 });
        assert_eq!(breakdown.0[3].count, 0);

        let rows: RawStatusBreakdown = serde_json::from_value(json!([
            { "statut": "en attente", "total": 2 },
            { "status": "PENDING", "count": 1 }
        ]))
        .unwrap();
        let breakdown = StatusBreakdown::from_wire(rows).unwrap();
        let pending = breakdown.0.iter().find(|c| c.status == ProjectStatus::Pending).unwrap();
        assert_eq!(pending.count, 3);
    }

    #[test]
    fn test_trend_sorted_and_filtered() {
        let raw: Vec<RawTrendPoint> = serde_json::from_value(json!([
            { "date": "2024-03-02", "completed": 4 },
            { "date": "not a date", "completed": 1 },
            { "jour": [2024, 3, 1], "terminees": 2, "creees": 5 }
        ]))
        .unwrap();
        let trend = Trend::from_wire(raw).unwrap();
        assert_eq!(trend.0.len(), 2);
        assert_eq!(trend.completed_series(), vec![2.0, 4.0]);
        assert_eq!(trend.created_series(), vec![5.0, 0.0]);
    }

    #[test]
    fn test_overview_defaults_and_clamp() {
        let raw: AnalyticsOverview =
            serde_json::from_value(json!({ "nbProjets": 4, "progressionMoyenne": 130.0 })).unwrap();
        let overview = AnalyticsOverview::from_wire(raw).unwrap();
        assert_eq!(overview.total_projects, 4);
        assert_eq!(overview.average_progression, 100.0);
        assert_eq!(overview.task_completion(), 0);
    }

    #[test]
    fn test_workload_shapes() {
        let raw: RawWorkload = serde_json::from_value(json!({
            "developerId": 5, "developerName": "Ines",
            "openTasks": 3, "plannedHours": 20, "effectiveHours": 25
        }))
        .unwrap();
        let workload = Workload::from_wire(raw).unwrap();
        assert_eq!(workload.developer.name, "Ines");
        assert_eq!(workload.load_percent(), 100);

        let raw: RawWorkload = serde_json::from_value(json!({ "openTasks": 1 })).unwrap();
        assert!(Workload::from_wire(raw).is_err());
    }
}
