//! Schedule generation service: the one component that wires the repository
//! port, the allocator, and the statistics reporter into a single
//! transactional operation.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::domain::{DomainError, NewSchedule};
use crate::ports::ScheduleRepository;
use crate::scheduler::{
    build_statistics, fallback_assign, GreedyAllocator, ScheduleStatistics, SchedulerConfig,
};

/// Parameters for one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub school_id: i64,
    pub academic_year: i32,
    pub is_first_half: bool,
    pub name: String,
    pub description: String,
}

/// Result envelope returned by every generation call, success or not.
/// Serializes losslessly for callers that hand it straight to a UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    pub success: bool,
    pub schedule_id: Option<i64>,
    pub message: String,
    pub statistics: Option<ScheduleStatistics>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

/// Service for generating one term's duty schedule.
pub struct GenerationService<R>
where
    R: ScheduleRepository + ?Sized,
{
    repo: Arc<R>,
    config: SchedulerConfig,
}

impl<R> GenerationService<R>
where
    R: ScheduleRepository + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            config: SchedulerConfig::default(),
        }
    }

    /// Create with custom scoring/allocation constants.
    pub fn with_config(repo: Arc<R>, config: SchedulerConfig) -> Self {
        Self { repo, config }
    }

    /// Generate with an entropy-seeded RNG.
    pub async fn generate(&self, request: GenerationRequest) -> GenerationOutcome {
        let mut rng = StdRng::from_entropy();
        self.run(request, &mut rng).await
    }

    /// Generate with a fixed seed. Same inputs and seed reproduce the same
    /// schedule, which is what the property tests lean on.
    pub async fn generate_seeded(&self, request: GenerationRequest, seed: u64) -> GenerationOutcome {
        let mut rng = StdRng::seed_from_u64(seed);
        self.run(request, &mut rng).await
    }

    #[instrument(skip(self, request, rng), fields(
        school_id = request.school_id,
        academic_year = request.academic_year,
        is_first_half = request.is_first_half,
    ))]
    async fn run(&self, request: GenerationRequest, rng: &mut StdRng) -> GenerationOutcome {
        match self.try_generate(&request, rng).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, "schedule generation failed");
                failure_envelope(err)
            }
        }
    }

    async fn try_generate(
        &self,
        request: &GenerationRequest,
        rng: &mut StdRng,
    ) -> anyhow::Result<GenerationOutcome> {
        let members = self
            .repo
            .load_members(request.school_id, request.academic_year)
            .await?;
        let rooms = self.repo.load_rooms(request.school_id).await?;

        if members.is_empty() {
            return Err(DomainError::NoMembers {
                school_id: request.school_id,
                academic_year: request.academic_year,
            }
            .into());
        }
        if rooms.is_empty() {
            return Err(DomainError::NoRooms {
                school_id: request.school_id,
            }
            .into());
        }

        // Rotation history only constrains the second half; a missing
        // first-half schedule simply leaves the set empty.
        let prior_wed_fri = if request.is_first_half {
            HashSet::new()
        } else {
            self.repo
                .load_prior_wed_fri(request.school_id, request.academic_year)
                .await?
        };

        info!(
            members = members.len(),
            rooms = rooms.len(),
            rotation_locked = prior_wed_fri.len(),
            "inputs loaded"
        );

        let allocator = GreedyAllocator::new(
            &self.config,
            &members,
            &rooms,
            &prior_wed_fri,
            request.is_first_half,
        );
        let board = match allocator.run(rng) {
            Some(board) => board,
            None => {
                warn!("greedy allocation failed, running fallback sweep");
                fallback_assign(
                    &self.config,
                    &members,
                    &rooms,
                    &prior_wed_fri,
                    request.is_first_half,
                )
            }
        };

        let schedule = NewSchedule {
            school_id: request.school_id,
            name: request.name.clone(),
            description: request.description.clone(),
            academic_year: request.academic_year,
            is_first_half: request.is_first_half,
        };
        let assignments = board.assignments();
        let schedule_id = self.repo.commit_schedule(&schedule, &assignments).await?;

        let (statistics, warnings) = build_statistics(&members, &rooms, &board);
        info!(
            schedule_id,
            assignments = assignments.len(),
            warnings = warnings.len(),
            "schedule generated"
        );

        Ok(GenerationOutcome {
            success: true,
            schedule_id: Some(schedule_id),
            message: "schedule generated".to_string(),
            statistics: Some(statistics),
            warnings,
            errors: Vec::new(),
            generated_at: Utc::now(),
        })
    }
}

/// Convert any lower-layer error into the failure envelope. Domain errors
/// keep their kind; everything else is reported as a storage failure.
fn failure_envelope(err: anyhow::Error) -> GenerationOutcome {
    let (kind, message) = match err.downcast_ref::<DomainError>() {
        Some(domain) => (domain.kind(), domain.to_string()),
        None => ("storage", err.to_string()),
    };
    GenerationOutcome {
        success: false,
        schedule_id: None,
        message: message.clone(),
        statistics: None,
        warnings: Vec::new(),
        errors: vec![format!("{kind}: {message}")],
        generated_at: Utc::now(),
    }
}
