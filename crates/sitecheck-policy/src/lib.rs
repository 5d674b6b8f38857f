use serde::{Deserialize, Serialize};
use sitecheck_core::{EpochMillis, SiteId, UserId};
use sitecheck_geo::fence::{self, FenceCfg, FenceVerdict};
use sitecheck_geo::{GeoPoint, SiteSnapshot};

/// Write actions that are only permitted to users physically on site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateAction {
    AcceptDelivery,
    CreateViolation,
    ResolveViolation,
    CloseWorkDay,
    ProposeScheduleChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateDecision {
    Permit,
    Deny,
}

/// One gating request, evaluated against a site's boundary data. `location`
/// is the most recent resolved fix from the device location provider, absent
/// when no fix exists yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateRequest {
    pub site_id: SiteId,
    pub user_id: UserId,
    pub action: GateAction,
    pub location: Option<GeoPoint>,
    pub observed_at: EpochMillis,
}

/// Decision plus the fence verdict it rests on. The verdict lets callers
/// distinguish "no fix yet" from "off site" when wording the refusal message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateOutcome {
    pub decision: GateDecision,
    pub verdict: FenceVerdict,
}

impl GateOutcome {
    pub fn is_permitted(&self) -> bool {
        self.decision == GateDecision::Permit
    }
}

pub trait GatePolicy {
    fn evaluate(&self, request: &GateRequest, site: &SiteSnapshot) -> GateOutcome;
}

/// Permits a gated action exactly when the fence evaluator places the
/// requesting user on site.
#[derive(Debug, Clone, Default)]
pub struct OnSiteGatePolicy {
    cfg: FenceCfg,
}

impl OnSiteGatePolicy {
    pub fn new(cfg: FenceCfg) -> Self {
        Self { cfg }
    }

    pub fn fence_cfg(&self) -> &FenceCfg {
        &self.cfg
    }
}

impl GatePolicy for OnSiteGatePolicy {
    fn evaluate(&self, request: &GateRequest, site: &SiteSnapshot) -> GateOutcome {
        let verdict = fence::evaluate(
            request.location,
            site.geometry.as_ref(),
            site.center,
            &self.cfg,
        );
        let decision = if verdict.is_on_site() {
            GateDecision::Permit
        } else {
            GateDecision::Deny
        };

        tracing::debug!(
            site = %request.site_id,
            user = %request.user_id,
            action = ?request.action,
            observed_at = request.observed_at,
            verdict = ?verdict,
            decision = ?decision,
            "gated action evaluated"
        );

        GateOutcome { decision, verdict }
    }
}
