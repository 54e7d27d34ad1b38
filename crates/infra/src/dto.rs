//! Wire DTOs for the collaborator endpoints.
//!
//! These mirror the backend's JSON shapes exactly; conversions into domain
//! types live next to each DTO so drift shows up in one place. Optional
//! wire fields (`null` or missing) map to `None`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use launchtrack_analytics::{
    InsightMetrics, Prediction, PredictionMetrics, RiskInsight, RiskLevel,
};
use launchtrack_core::{Assignee, MemberId, RankedTask, Store, StoreId, TaskId};
use launchtrack_followup::DeliveryReceipt;

#[derive(Debug, Clone, Deserialize)]
pub struct StoreDto {
    pub id: StoreId,
    pub name: String,
    pub location: String,
}

impl From<StoreDto> for Store {
    fn from(dto: StoreDto) -> Self {
        Store::new(dto.id, dto.name, dto.location)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsightEnvelopeDto {
    pub insights: Vec<RiskInsightDto>,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RiskInsightDto {
    pub store_id: StoreId,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub metrics: InsightMetricsDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsightMetricsDto {
    pub completion_rate: f64,
    pub overdue_tasks: u32,
    #[serde(default)]
    pub days_until_opening: Option<i64>,
}

impl From<RiskInsightDto> for RiskInsight {
    fn from(dto: RiskInsightDto) -> Self {
        RiskInsight {
            store_id: dto.store_id,
            risk_level: dto.risk_level,
            risk_factors: dto.risk_factors,
            recommendations: dto.recommendations,
            metrics: InsightMetrics {
                completion_rate: dto.metrics.completion_rate,
                overdue_tasks: dto.metrics.overdue_tasks,
                days_until_opening: dto.metrics.days_until_opening,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionDto {
    pub store_id: StoreId,
    #[serde(default)]
    pub predicted_completion: Option<DateTime<Utc>>,
    pub on_track: bool,
    #[serde(default)]
    pub days_difference: Option<i64>,
    pub metrics: PredictionMetricsDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionMetricsDto {
    pub remaining_tasks: u32,
    pub average_tasks_per_day: f64,
    pub tasks_completed_recently: u32,
}

impl From<PredictionDto> for Prediction {
    fn from(dto: PredictionDto) -> Self {
        Prediction {
            store_id: dto.store_id,
            predicted_completion: dto.predicted_completion,
            on_track: dto.on_track,
            days_difference: dto.days_difference,
            metrics: PredictionMetrics {
                remaining_tasks: dto.metrics.remaining_tasks,
                average_tasks_per_day: dto.metrics.average_tasks_per_day,
                recently_completed: dto.metrics.tasks_completed_recently,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrioritizationDto {
    pub store_id: StoreId,
    pub tasks: Vec<RankedTaskDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankedTaskDto {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub priority_rank: u32,
    #[serde(default)]
    pub assignee: Option<AssigneeDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssigneeDto {
    pub id: MemberId,
    pub name: String,
    pub phone: String,
}

impl From<RankedTaskDto> for RankedTask {
    fn from(dto: RankedTaskDto) -> Self {
        RankedTask {
            id: dto.id,
            title: dto.title,
            description: dto.description,
            rank: dto.priority_rank,
            assignee: dto.assignee.map(|a| Assignee {
                member_id: a.id,
                name: a.name,
                phone: a.phone,
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FollowUpDto {
    pub task_id: TaskId,
    pub message: String,
    #[serde(default)]
    pub ai_generated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequestDto<'a> {
    pub phone: &'a str,
    pub message: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendReceiptDto {
    pub message_sid: String,
}

impl From<SendReceiptDto> for DeliveryReceipt {
    fn from(dto: SendReceiptDto) -> Self {
        DeliveryReceipt {
            message_id: dto.message_sid,
        }
    }
}
