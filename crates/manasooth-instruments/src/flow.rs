//! Ordering and advancing a multi-questionnaire session.

use manasooth_core::models::assessment::AssessmentType;

use crate::error::InstrumentError;

/// Order a selection canonically (WHO-5, GAD-7, PHQ-9), dropping duplicates.
pub fn ordered_flow(selection: &[AssessmentType]) -> Result<Vec<AssessmentType>, InstrumentError> {
    let flow: Vec<AssessmentType> = AssessmentType::FLOW
        .into_iter()
        .filter(|t| selection.contains(t))
        .collect();
    if flow.is_empty() {
        return Err(InstrumentError::EmptySelection);
    }
    Ok(flow)
}

/// Remove `completed` from the remaining flow. An empty result means the
/// session is finished and results can be produced.
pub fn advance(flow: &[AssessmentType], completed: AssessmentType) -> Vec<AssessmentType> {
    flow.iter().copied().filter(|t| *t != completed).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use AssessmentType::*;

    #[test]
    fn selection_is_put_in_canonical_order() {
        assert_eq!(ordered_flow(&[Phq9, Who5, Phq9]).unwrap(), vec![Who5, Phq9]);
    }

    #[test]
    fn empty_selection_is_rejected() {
        assert!(matches!(ordered_flow(&[]), Err(InstrumentError::EmptySelection)));
    }

    #[test]
    fn advancing_removes_the_completed_assessment() {
        let flow = vec![Who5, Gad7, Phq9];
        let flow = advance(&flow, Who5);
        assert_eq!(flow, vec![Gad7, Phq9]);
        assert_eq!(advance(&flow, Phq9), vec![Gad7]);
        assert!(advance(&[Gad7], Gad7).is_empty());
    }
}
