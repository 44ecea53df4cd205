use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use indicatif::ProgressBar;
use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

use rd_generation::{Candidate, GenerationError, Template};
use rd_generation::generate;

use crate::region::TargetSlice;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    Cancelled,
    Generation { template: String, source: GenerationError },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Cancelled => write!(f, "Design was cancelled."),
            PipelineError::Generation { template, source } => {
                write!(f, "Template {}: {}", template, source)
            }
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Generation { source, .. } => Some(source),
            PipelineError::Cancelled => None,
        }
    }
}

/// A candidate together with the template it came from. Cut-site
/// indices refer to the full target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Design {
    pub template: String,
    pub cutsite: Option<usize>,
    #[serde(flatten)]
    pub candidate: Candidate,
}

fn design_one(
    template: &Template,
    target: &TargetSlice,
    cancelled: impl Fn() -> bool,
) -> Result<Vec<Design>, PipelineError> {
    if cancelled() {
        return Err(PipelineError::Cancelled);
    }
    let failed = |source: GenerationError| PipelineError::Generation { template: template.name.clone(), source };

    let mut designs = Vec::new();
    for candidate in generate(template, target.sequence).map_err(failed)? {
        if cancelled() {
            return Err(PipelineError::Cancelled);
        }
        let mut candidate = candidate.map_err(failed)?;
        for i in candidate.cutsite_indices.iter_mut() {
            *i += target.offset;
        }
        designs.push(Design {
            template: template.name.clone(),
            cutsite: template.cutsite.map(|c| candidate.cutsite_number(c)),
            candidate,
        });
    }
    debug!("Template {} at offset {}: {} candidates.", template.name, target.offset, designs.len());
    Ok(designs)
}

/// Like [`design_candidates`], ticking `progress` once per
/// (template, target) pair.
pub fn design_candidates_with_progress(
    templates: &[Template],
    targets: &[TargetSlice],
    cancel: &AtomicBool,
    progress: &ProgressBar,
) -> Result<Vec<Design>, PipelineError> {
    let work: Vec<(&Template, &TargetSlice)> = templates.iter()
        .flat_map(|t| targets.iter().map(move |r| (t, r)))
        .collect();
    info!("Designing {} templates against {} target regions.", templates.len(), targets.len());

    let results: Vec<Result<Vec<Design>, PipelineError>> = work
        .into_par_iter()
        .map_init(
            || progress.clone(),
            |pb, (template, target)| {
                let result = design_one(template, target, || cancel.load(Ordering::Relaxed));
                if matches!(result, Err(PipelineError::Generation { .. })) {
                    cancel.store(true, Ordering::Relaxed);
                }
                pb.inc(1);
                result
            },
        ).collect();

    let mut designs = Vec::new();
    let mut cancelled = false;
    for result in results {
        match result {
            Ok(d) => designs.extend(d),
            Err(PipelineError::Cancelled) => cancelled = true,
            Err(e) => return Err(e),
        }
    }
    if cancelled {
        return Err(PipelineError::Cancelled);
    }
    info!("{} candidates designed.", designs.len());
    Ok(designs)
}

/// Generates the candidates of every template against every target
/// slice in parallel, in input order.
///
/// The work stops early when `cancel` is raised. The first generation
/// error raises it as well and is returned.
pub fn design_candidates(
    templates: &[Template],
    targets: &[TargetSlice],
    cancel: &AtomicBool,
) -> Result<Vec<Design>, PipelineError> {
    design_candidates_with_progress(templates, targets, cancel, &ProgressBar::hidden())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(offset: usize, sequence: &str) -> TargetSlice<'_> {
        TargetSlice { offset, sequence }
    }

    #[test]
    fn test_design_in_order() {
        let templates = vec![
            Template::new("N", "0", "NGU", "0..").with_name("a").with_cutsite(2),
            Template::new("GN", "()", "A", ".").with_name("b"),
        ];
        let targets = vec![slice(0, "AGUAGU"), slice(10, "CGU")];
        let cancel = AtomicBool::new(false);
        let designs = design_candidates(&templates, &targets, &cancel).unwrap();

        let found: Vec<(&str, String)> = designs.iter()
            .map(|d| (d.template.as_str(), d.candidate.sequence.to_string()))
            .collect();
        assert_eq!(found, vec![
            ("a", "U".to_string()),
            ("a", "G".to_string()),
            ("b", "GC".to_string()),
            ("b", "GU".to_string()),
        ]);
        assert_eq!(designs[0].candidate.cutsite_indices, vec![0, 3]);
        assert_eq!(designs[1].candidate.cutsite_indices, vec![10]);
        assert_eq!(designs[0].cutsite, Some(2));
        assert_eq!(designs[2].cutsite, None);
    }

    #[test]
    fn test_error_is_reported() {
        let templates = vec![
            Template::new("GN", "()", "N", ".").with_name("ok"),
            Template::new("CC", "()", "N", ".").with_name("broken"),
        ];
        let targets = vec![slice(0, "AUG")];
        let cancel = AtomicBool::new(false);
        let err = design_candidates(&templates, &targets, &cancel).unwrap_err();
        assert_eq!(err, PipelineError::Generation {
            template: "broken".to_string(),
            source: GenerationError::NeighboursDontMatch(1),
        });
        assert_eq!(err.to_string(), "Template broken: Neighbours don't match!");
        assert!(cancel.load(Ordering::Relaxed));
    }

    #[test]
    fn test_cancelled() {
        let templates = vec![Template::new("GN", "()", "N", ".")];
        let cancel = AtomicBool::new(true);
        assert_eq!(
            design_candidates(&templates, &[slice(0, "AUG")], &cancel),
            Err(PipelineError::Cancelled)
        );
    }

    #[test]
    fn test_cancelled_between_candidates() {
        let template = Template::new("GN", "()", "N", ".");
        let target = slice(0, "A");
        let cancel = AtomicBool::new(false);
        let checks = std::cell::Cell::new(0);
        let result = design_one(&template, &target, || {
            checks.set(checks.get() + 1);
            // Raised once the first candidate has been designed.
            if checks.get() == 3 {
                cancel.store(true, Ordering::Relaxed);
            }
            cancel.load(Ordering::Relaxed)
        });
        assert_eq!(result, Err(PipelineError::Cancelled));
        assert_eq!(checks.get(), 3);

        let all = design_one(&template, &target, || false).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_serialize_design() {
        let templates = vec![Template::new("GN", "()", "N", ".").with_name("b")];
        let cancel = AtomicBool::new(false);
        let designs = design_candidates(&templates, &[slice(0, "A")], &cancel).unwrap();
        let json = serde_json::to_string(&designs[0]).unwrap();
        assert!(json.starts_with("{\"template\":\"b\""));
        assert!(json.contains("\"sequence\":\"GC\""));
    }
}
