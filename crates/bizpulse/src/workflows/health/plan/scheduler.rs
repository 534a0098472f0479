use super::super::domain::{FactRecord, Pillar};
use super::super::scoring::ScoreResult;
use super::catalog::{metric_tasks, ActionCatalog, TaskTemplate};
use super::{ActionPlan, ActionTask};

pub const MAX_PLAN_TASKS: usize = 10;
pub const MAX_PLAN_DAYS: u8 = 7;
const PRIMARY_TASKS: usize = 5;
const SECONDARY_TASKS: usize = 3;
const METRIC_TASKS: usize = 2;

/// Due day for the task at zero-based `position`. Overflow stays on the last day.
pub fn due_in_days_for(position: usize) -> u8 {
    let day = position.saturating_add(1).min(usize::from(MAX_PLAN_DAYS));
    day as u8
}

/// Builds the 7-day plan from the two weakest pillars.
pub fn build_action_plan(
    score: &ScoreResult,
    facts: &FactRecord,
    catalog: &ActionCatalog,
) -> ActionPlan {
    let ranked = score.pillars_by_score();
    let primary_pillar = ranked
        .first()
        .map(|(pillar, _)| *pillar)
        .unwrap_or(Pillar::Revenue);
    let secondary_pillar = ranked.get(1).map(|(pillar, _)| *pillar);

    let mut selected: Vec<&TaskTemplate> = eligible(catalog, primary_pillar, facts)
        .into_iter()
        .take(PRIMARY_TASKS)
        .collect();

    if let Some(secondary) = secondary_pillar {
        selected.extend(
            eligible(catalog, secondary, facts)
                .into_iter()
                .take(SECONDARY_TASKS),
        );
    }

    let mut tasks: Vec<ActionTask> = selected
        .into_iter()
        .enumerate()
        .map(|(position, template)| to_task(template, score, position))
        .collect();

    let mut appended = 0;
    for metric in metric_tasks() {
        if appended >= METRIC_TASKS || tasks.len() >= MAX_PLAN_TASKS {
            break;
        }
        if !metric.fields.iter().any(|field| score.is_missing(*field)) {
            continue;
        }
        if tasks
            .iter()
            .any(|task| is_near_duplicate(&task.title, metric.template.title))
        {
            continue;
        }
        let position = tasks.len();
        tasks.push(to_task(&metric.template, score, position));
        appended += 1;
    }

    ActionPlan {
        primary_pillar,
        secondary_pillar,
        tasks,
    }
}

fn eligible<'a>(
    catalog: &'a ActionCatalog,
    pillar: Pillar,
    facts: &FactRecord,
) -> Vec<&'a TaskTemplate> {
    catalog
        .tasks_for_pillar(pillar)
        .into_iter()
        .filter(|template| template.is_eligible(facts))
        .collect()
}

fn to_task(template: &TaskTemplate, score: &ScoreResult, position: usize) -> ActionTask {
    ActionTask {
        id: template.key.to_string(),
        title: template.title.to_string(),
        rationale: format!(
            "{} {} currently scores {}.",
            template.rationale,
            template.pillar.label(),
            score.pillar_score(template.pillar)
        ),
        first_action: template.first_action.to_string(),
        expected_impact: template.expected_impact.to_string(),
        effort: template.effort,
        due_in_days: due_in_days_for(position),
        pillar: template.pillar,
    }
}

fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Titles are near duplicates when their normalized forms match or one contains the other.
pub(crate) fn is_near_duplicate(existing: &str, candidate: &str) -> bool {
    let existing = normalize_title(existing);
    let candidate = normalize_title(candidate);
    existing == candidate || existing.contains(&candidate) || candidate.contains(&existing)
}
