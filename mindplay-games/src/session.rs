//! Sequential session of activities and the results they produced.

use mindplay_core::{ActivityKind, CoreError, Tier, TrialResult, percent};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStep {
    pub activity: ActivityKind,
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPlan {
    pub steps: Vec<SessionStep>,
}

impl Default for SessionPlan {
    fn default() -> Self {
        let step = |activity, tier| SessionStep { activity, tier };
        Self {
            steps: vec![
                step(ActivityKind::Memory, Tier::Medium),
                step(ActivityKind::Reaction, Tier::Medium),
                step(ActivityKind::Target, Tier::Medium),
                step(ActivityKind::Breathing, Tier::Easy),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionEntry {
    pub activity: ActivityKind,
    pub tier: Tier,
    pub result: TrialResult,
}

type CompletionHook = Box<dyn FnMut(ActivityKind, &TrialResult)>;

pub struct Session {
    plan: SessionPlan,
    current: usize,
    entries: Vec<SessionEntry>,
    on_complete: Option<CompletionHook>,
}

impl Session {
    pub fn new(plan: SessionPlan) -> Self {
        Self {
            plan,
            current: 0,
            entries: Vec::new(),
            on_complete: None,
        }
    }

    /// Called once for every result accepted by [`Session::record`].
    pub fn on_complete(mut self, hook: impl FnMut(ActivityKind, &TrialResult) + 'static) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    pub fn current_step(&self) -> Option<SessionStep> {
        self.plan.steps.get(self.current).copied()
    }

    /// Stores the result of the current step and moves to the next one.
    pub fn record(&mut self, result: TrialResult) -> Result<Option<SessionStep>, CoreError> {
        let step = self.current_step().ok_or(CoreError::SessionComplete)?;
        if step.activity != result.kind() {
            return Err(CoreError::ActivityMismatch {
                expected: step.activity,
                got: result.kind(),
            });
        }
        if let Some(hook) = self.on_complete.as_mut() {
            hook(step.activity, &result);
        }
        self.entries.push(SessionEntry {
            activity: step.activity,
            tier: step.tier,
            result,
        });
        self.current += 1;
        info!(
            activity = %step.activity,
            step = self.current,
            of = self.plan.steps.len(),
            "session step recorded"
        );
        Ok(self.current_step())
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.plan.steps.len()
    }

    pub fn progress_percent(&self) -> u32 {
        percent(self.current as u32, self.plan.steps.len() as u32)
    }

    pub fn entries(&self) -> &[SessionEntry] {
        &self.entries
    }

    /// Most recent result recorded for `activity`.
    pub fn result_for(&self, activity: ActivityKind) -> Option<&TrialResult> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.activity == activity)
            .map(|e| &e.result)
    }

    pub fn plan(&self) -> &SessionPlan {
        &self.plan
    }
}
