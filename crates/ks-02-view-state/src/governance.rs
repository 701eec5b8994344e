//! # Governance View
//!
//! Derived proposal status, tallies, ordering and the create-proposal form.
//!
//! Eligibility, quorum and double voting are the contract's concern; nothing
//! here blocks a vote.

use crate::errors::FormError;
use crate::format::{format_min_voting_period, time_remaining};
use ks_01_chain_gateway::{NewProposal, Proposal};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Voting window preselected in the create form (1 day).
pub const DEFAULT_VOTING_PERIOD_SECS: u64 = 86_400;

/// Shortest voting window the form accepts unless configured otherwise (1 hour).
pub const DEFAULT_MIN_VOTING_PERIOD_SECS: u64 = 3_600;

/// Voting window choices offered by the create form.
pub const VOTING_PERIOD_OPTIONS: [(&str, u64); 4] = [
    ("1 day", 86_400),
    ("3 days", 259_200),
    ("1 week", 604_800),
    ("2 weeks", 1_209_600),
];

/// Lifecycle position of a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    /// Voting window open.
    Active,
    /// Window closed, not yet executed.
    Ended,
    /// Executed; outcome in `passed`.
    Executed,
}

impl ProposalStatus {
    /// Status of `proposal` at `now_secs`.
    pub fn of(proposal: &Proposal, now_secs: u64) -> Self {
        if proposal.executed {
            ProposalStatus::Executed
        } else if proposal.voting_closed(now_secs) {
            ProposalStatus::Ended
        } else {
            ProposalStatus::Active
        }
    }

    fn rank(self) -> u8 {
        match self {
            ProposalStatus::Active => 0,
            ProposalStatus::Ended => 1,
            ProposalStatus::Executed => 2,
        }
    }
}

/// A proposal with everything the card shows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProposalView {
    /// Underlying record.
    #[serde(flatten)]
    pub proposal: Proposal,
    /// Derived status.
    pub status: ProposalStatus,
    /// Share of votes in favour, percent.
    pub for_percentage: f64,
    /// Share of votes against, percent.
    pub against_percentage: f64,
    /// Countdown while active.
    pub time_remaining: Option<String>,
}

impl ProposalView {
    /// Derive the view of `proposal` at `now_secs`.
    pub fn new(proposal: Proposal, now_secs: u64) -> Self {
        let status = ProposalStatus::of(&proposal, now_secs);
        let total = proposal.for_votes as f64 + proposal.against_votes as f64;
        let (for_percentage, against_percentage) = if total > 0.0 {
            (
                proposal.for_votes as f64 / total * 100.0,
                proposal.against_votes as f64 / total * 100.0,
            )
        } else {
            (0.0, 0.0)
        };
        let time_remaining = (status == ProposalStatus::Active)
            .then(|| time_remaining(proposal.end_time, now_secs));
        Self {
            proposal,
            status,
            for_percentage,
            against_percentage,
            time_remaining,
        }
    }

    /// Badge text.
    pub fn label(&self) -> &'static str {
        match self.status {
            ProposalStatus::Active => "Active",
            ProposalStatus::Ended => "Ended (Unexecuted)",
            ProposalStatus::Executed if self.proposal.passed => "Passed",
            ProposalStatus::Executed => "Failed",
        }
    }

    /// Whether the execute action is offered.
    pub fn can_execute(&self) -> bool {
        self.status == ProposalStatus::Ended
    }
}

/// Active first, then ended, then executed; later `end_time` first within each.
pub fn compare_proposals(a: &ProposalView, b: &ProposalView) -> Ordering {
    a.status
        .rank()
        .cmp(&b.status.rank())
        .then_with(|| b.proposal.end_time.cmp(&a.proposal.end_time))
}

/// Derive and order views for display.
pub fn proposal_views(proposals: Vec<Proposal>, now_secs: u64) -> Vec<ProposalView> {
    let mut views: Vec<_> = proposals
        .into_iter()
        .map(|p| ProposalView::new(p, now_secs))
        .collect();
    views.sort_by(compare_proposals);
    views
}

/// Counts shown above the proposal list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalStats {
    /// All proposals.
    pub total: usize,
    /// Voting window open.
    pub active: usize,
    /// Executed and passed.
    pub passed: usize,
    /// Executed and not passed.
    pub failed: usize,
}

impl ProposalStats {
    /// Count `views`.
    pub fn from_views(views: &[ProposalView]) -> Self {
        let executed = |passed: bool| {
            views
                .iter()
                .filter(|v| v.status == ProposalStatus::Executed && v.proposal.passed == passed)
                .count()
        };
        Self {
            total: views.len(),
            active: views
                .iter()
                .filter(|v| v.status == ProposalStatus::Active)
                .count(),
            passed: executed(true),
            failed: executed(false),
        }
    }
}

/// Raw create-proposal form input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProposalDraft {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Content reference.
    pub content_uri: String,
    /// Voting window in seconds.
    pub voting_period_secs: u64,
}

impl Default for ProposalDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            content_uri: String::new(),
            voting_period_secs: DEFAULT_VOTING_PERIOD_SECS,
        }
    }
}

impl ProposalDraft {
    /// Whether the submit button is enabled.
    pub fn is_valid(&self, min_voting_period_secs: u64) -> bool {
        self.validate("", min_voting_period_secs).is_ok()
    }

    /// Check the draft and bind it to `channel_id`.
    pub fn validate(
        &self,
        channel_id: &str,
        min_voting_period_secs: u64,
    ) -> Result<NewProposal, FormError> {
        if self.title.trim().is_empty()
            || self.description.trim().is_empty()
            || self.content_uri.trim().is_empty()
        {
            return Err(FormError::MissingFields);
        }
        if self.voting_period_secs < min_voting_period_secs {
            return Err(FormError::VotingPeriodTooShort(format_min_voting_period(
                min_voting_period_secs,
            )));
        }
        Ok(NewProposal {
            channel_id: channel_id.to_string(),
            title: self.title.clone(),
            description: self.description.clone(),
            content_uri: self.content_uri.clone(),
            voting_period_secs: self.voting_period_secs,
        })
    }
}

/// Which proposal a vote or execution is pending on, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingAction {
    proposal_id: Option<String>,
}

impl PendingAction {
    /// Mark `proposal_id` busy.
    pub fn begin(&mut self, proposal_id: &str) {
        self.proposal_id = Some(proposal_id.to_string());
    }

    /// Clear the busy marker.
    pub fn finish(&mut self) {
        self.proposal_id = None;
    }

    /// Whether `proposal_id` is the busy one.
    pub fn is_busy(&self, proposal_id: &str) -> bool {
        self.proposal_id.as_deref() == Some(proposal_id)
    }
}
