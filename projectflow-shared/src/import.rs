/// Planner export mapping for the bulk importer
///
/// Pure translation of planner export rows (one row per delivery, with a
/// semicolon-delimited checklist) into ProjectFlow projects, tasks, and
/// users. Everything here is side-effect free; the `projectflow-importer`
/// binary owns the database writes.
///
/// The vocabulary tables mirror the planner's Portuguese labels: progress
/// labels ("Não iniciado", "Em andamento", "Concluída"), bucket names, and
/// priority labels ("Urgente", "Importante", "Média", "Baixa"). Unknown
/// labels fall back to conservative defaults rather than failing the row.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};

use crate::models::project::ProjectStatus;
use crate::models::task::{TaskPriority, TaskStatus};

/// Domain for generated collaborator emails.
pub const EMAIL_DOMAIN: &str = "projectflow.local";

/// Fallback avatar color, same as the schema default.
pub const DEFAULT_AVATAR_COLOR: &str = "#6366f1";

/// Avatar colors handed out to imported users in creation order.
pub const AVATAR_PALETTE: [&str; 15] = [
    "#6366f1", "#10b981", "#f59e0b", "#8b5cf6", "#ec4899", "#06b6d4", "#84cc16", "#f97316",
    "#14b8a6", "#a855f7", "#eab308", "#ef4444", "#0ea5e9", "#d946ef", "#64748b",
];

/// Max length of an assembled project description.
const DESCRIPTION_MAX_CHARS: usize = 2000;

/// One row of the planner export
///
/// Field aliases match the planner's column headers so an exported JSON
/// can be fed in without renaming keys.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlannerRow {
    /// Delivery name; becomes the project name. Blank rows are skipped.
    #[serde(default, alias = "Nome da tarefa")]
    pub name: String,

    /// Planner bucket; maps to a project status and a "Fase:" line.
    #[serde(default, alias = "Nome do Bucket")]
    pub bucket: String,

    /// Progress label ("Não iniciado" / "Em andamento" / "Concluída")
    #[serde(default, alias = "Progresso")]
    pub progress: String,

    /// Priority label
    #[serde(default, alias = "Prioridade")]
    pub priority: String,

    /// Semicolon-delimited list of assigned people
    #[serde(default, alias = "Atribuído a")]
    pub assigned_to: String,

    /// Who created the row
    #[serde(default, alias = "Criado por")]
    pub created_by: String,

    /// Who completed the row (only used to collect people)
    #[serde(default, alias = "Concluída por")]
    pub completed_by: String,

    /// Raw description
    #[serde(default, alias = "Descrição")]
    pub description: String,

    /// Comma-separated labels; folded into the description
    #[serde(default, alias = "Rótulos")]
    pub labels: String,

    /// Semicolon-delimited checklist items
    #[serde(default, alias = "Itens da lista de verificação")]
    pub checklist: String,

    /// "x/y" count of completed checklist items
    #[serde(default, alias = "Itens concluídos da lista de verificação")]
    pub completed_count: String,

    /// Row creation date
    #[serde(default, alias = "Criado em")]
    pub created_at: String,

    /// Planned start date
    #[serde(default, alias = "Data de início")]
    pub start_date: String,

    /// Planned completion date
    #[serde(default, alias = "Data de conclusão")]
    pub end_date: String,
}

/// The whole import payload
///
/// `leaders` names the people who should be created as managers; everyone
/// else becomes a collaborator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportFile {
    /// People imported with role manager
    #[serde(default)]
    pub leaders: Vec<String>,

    /// Planner rows
    pub rows: Vec<PlannerRow>,
}

/// A project produced from one planner row, before user resolution
#[derive(Debug, Clone)]
pub struct MappedProject {
    /// Project name
    pub name: String,

    /// Assembled description (raw + labels + phase)
    pub description: Option<String>,

    /// Owner's display name (resolved to a user ID by the importer)
    pub owner: Option<String>,

    /// Start date (falls back to the row's creation date)
    pub start_date: Option<DateTime<Utc>>,

    /// End date
    pub end_date: Option<DateTime<Utc>>,

    /// Mapped lifecycle status
    pub status: ProjectStatus,

    /// Vocabulary percentage (0 / 50 / 100), pinned as manual progress
    pub progress: f64,

    /// Tasks exploded from the checklist (or the single execution task)
    pub tasks: Vec<MappedTask>,
}

/// A task produced from a checklist item or a whole row
#[derive(Debug, Clone)]
pub struct MappedTask {
    /// Task title
    pub title: String,

    /// Short description
    pub description: Option<String>,

    /// Assignee's display name
    pub assignee: Option<String>,

    /// Mapped status
    pub status: TaskStatus,

    /// Priority inherited from the row
    pub priority: TaskPriority,

    /// Deadline from the item prefix or the row's end date
    pub deadline: Option<DateTime<Utc>>,
}

/// A checklist item split out of the semicolon list
#[derive(Debug, Clone, PartialEq)]
pub struct ChecklistItem {
    /// Item title with any date prefix stripped
    pub title: String,

    /// Deadline parsed from a leading "d/m - " prefix
    pub deadline: Option<DateTime<Utc>>,
}

/// Maps a progress label to the task status it implies
pub fn progress_to_task_status(label: &str) -> TaskStatus {
    match label.trim() {
        "Em andamento" => TaskStatus::InProgress,
        "Concluída" => TaskStatus::Done,
        _ => TaskStatus::Todo,
    }
}

/// Maps a progress label to the project percentage it implies
pub fn progress_to_percent(label: &str) -> f64 {
    match label.trim() {
        "Em andamento" => 50.0,
        "Concluída" => 100.0,
        _ => 0.0,
    }
}

/// Maps a planner bucket to a project status
///
/// Waiting buckets map to Planning, the cancelled bucket to Cancelled, and
/// everything else (including unknown buckets) to Active.
pub fn bucket_to_project_status(bucket: &str) -> ProjectStatus {
    match bucket.trim() {
        "Aguardando material base"
        | "Aguardando reunião inicial"
        | "Fazer Cronograma"
        | "Templates e construção de card" => ProjectStatus::Planning,
        "Projetos cancelados/suspensos" => ProjectStatus::Cancelled,
        _ => ProjectStatus::Active,
    }
}

/// Maps a priority label to a task priority, defaulting to Medium
pub fn priority_from_label(label: &str) -> TaskPriority {
    match label.trim() {
        "Urgente" => TaskPriority::Critical,
        "Importante" => TaskPriority::High,
        "Baixa" => TaskPriority::Low,
        _ => TaskPriority::Medium,
    }
}

/// Parses the "x/y" completed-count field; anything unparseable is 0
pub fn parse_completed_count(raw: &str) -> usize {
    raw.split('/')
        .next()
        .and_then(|n| n.trim().parse::<usize>().ok())
        .unwrap_or(0)
}

/// Parses a planner date ("d/m/Y", "Y-m-d", or "d-m-Y") at midnight UTC
pub fn parse_planner_date(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") || s == "None" {
        return None;
    }

    for fmt in ["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y"] {
        if let Ok(date) = chrono::NaiveDate::parse_from_str(s, fmt) {
            return Utc
                .from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
                .single();
        }
    }

    None
}

/// Splits a semicolon-delimited people field into trimmed names
pub fn split_people(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|p| !p.is_empty() && !p.eq_ignore_ascii_case("nan"))
        .map(str::to_string)
        .collect()
}

/// Parses one checklist item, peeling off a leading "d/m - " deadline
///
/// The export writes item deadlines without a year; the planning horizon
/// ran from mid-2025 into 2026, so months January–June belong to 2026 and
/// the rest to 2025.
pub fn parse_checklist_item(raw: &str) -> ChecklistItem {
    let raw = raw.trim();

    if let Some((prefix, rest)) = raw.split_once(" - ") {
        let prefix = prefix.trim();
        if prefix.len() <= 6 && prefix.contains('/') {
            if let Some((day, month)) = prefix.split_once('/') {
                if let (Ok(day), Ok(month)) = (day.trim().parse::<u32>(), month.trim().parse::<u32>())
                {
                    let year = if month <= 6 { 2026 } else { 2025 };
                    if let Some(deadline) = Utc
                        .with_ymd_and_hms(year, month, day, 0, 0, 0)
                        .single()
                    {
                        return ChecklistItem {
                            title: rest.trim().to_string(),
                            deadline: Some(deadline),
                        };
                    }
                }
            }
        }
    }

    ChecklistItem {
        title: raw.to_string(),
        deadline: None,
    }
}

/// Splits the checklist field into parsed items
pub fn split_checklist(raw: &str) -> Vec<ChecklistItem> {
    raw.split(';')
        .map(str::trim)
        .filter(|e| !e.is_empty() && !e.eq_ignore_ascii_case("nan"))
        .map(parse_checklist_item)
        .collect()
}

/// Status of the checklist item at `index`
///
/// The first `done_count` items are Done; when the row itself is Done,
/// every item is. For an in-progress row the item right after the last
/// completed one is InProgress, the rest Todo.
pub fn checklist_item_status(index: usize, done_count: usize, row_status: TaskStatus) -> TaskStatus {
    if index < done_count || row_status == TaskStatus::Done {
        TaskStatus::Done
    } else if row_status == TaskStatus::InProgress && index == done_count {
        TaskStatus::InProgress
    } else {
        TaskStatus::Todo
    }
}

/// Assembles a project description from the raw text, labels, and bucket
///
/// Produces `raw`, `Rótulos: …`, and `Fase: …` paragraphs, truncated to
/// 2000 characters. Returns None when all parts are empty.
pub fn build_description(raw: &str, labels: &str, bucket: &str) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();

    let raw = raw.trim();
    if !raw.is_empty() && !raw.eq_ignore_ascii_case("nan") {
        parts.push(raw.replace("\\n", "\n"));
    }

    let labels = labels.trim();
    if !labels.is_empty() && !labels.eq_ignore_ascii_case("nan") {
        parts.push(format!("Rótulos: {}", labels));
    }

    let bucket = bucket.trim();
    if !bucket.is_empty() {
        parts.push(format!("Fase: {}", bucket));
    }

    if parts.is_empty() {
        return None;
    }

    Some(truncate_chars(&parts.join("\n\n"), DESCRIPTION_MAX_CHARS))
}

/// Truncates to at most `max` characters on a char boundary
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Lowercases, folds Latin diacritics to ASCII, and joins words with dots
///
/// `"Mariana Ribeiro Gonçalves"` becomes `"mariana.ribeiro.goncalves"`.
/// Characters outside `[a-z0-9 ]` after folding are dropped.
pub fn email_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());

    for c in name.to_lowercase().chars() {
        let folded = fold_diacritic(c);
        match folded {
            'a'..='z' | '0'..='9' => slug.push(folded),
            ' ' => slug.push('.'),
            _ => {}
        }
    }

    slug
}

/// Maps accented Latin letters to their ASCII base letter
fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

/// Picks a unique email for a person, de-duplicating with numeric suffixes
///
/// The slug is capped so the local part stays well under common length
/// limits even with a suffix. The chosen email is recorded in `used`.
pub fn assign_email(name: &str, used: &mut HashSet<String>) -> String {
    let slug = email_slug(name);
    let base: String = slug.chars().take(45).collect();

    let mut email = format!("{}@{}", base, EMAIL_DOMAIN);
    let mut n = 1;
    while used.contains(&email) {
        let short: String = slug.chars().take(40).collect();
        email = format!("{}{}@{}", short, n, EMAIL_DOMAIN);
        n += 1;
    }

    used.insert(email.clone());
    email
}

/// Collects every distinct person named across all rows, sorted
pub fn collect_people(rows: &[PlannerRow]) -> BTreeSet<String> {
    let mut people = BTreeSet::new();

    for row in rows {
        for field in [&row.created_by, &row.assigned_to, &row.completed_by] {
            for person in split_people(field) {
                people.insert(person);
            }
        }
    }

    people
}

/// Maps one planner row to a project with its tasks
///
/// Returns None for rows with a blank name. A "Concluída" row forces the
/// project to Completed at 100% regardless of its bucket.
pub fn map_row(row: &PlannerRow) -> Option<MappedProject> {
    let name = row.name.trim();
    if name.is_empty() || name.eq_ignore_ascii_case("nan") {
        return None;
    }

    let row_status = progress_to_task_status(&row.progress);
    let priority = priority_from_label(&row.priority);

    let (status, progress) = if row_status == TaskStatus::Done {
        (ProjectStatus::Completed, 100.0)
    } else {
        (
            bucket_to_project_status(&row.bucket),
            progress_to_percent(&row.progress),
        )
    };

    let assignees = split_people(&row.assigned_to);
    let creator = row.created_by.trim();
    let owner = assignees
        .first()
        .cloned()
        .or_else(|| (!creator.is_empty() && !creator.eq_ignore_ascii_case("nan"))
            .then(|| creator.to_string()));

    let description = build_description(&row.description, &row.labels, &row.bucket);

    let created = parse_planner_date(&row.created_at);
    let start_date = parse_planner_date(&row.start_date).or(created);
    let end_date = parse_planner_date(&row.end_date);

    let items = split_checklist(&row.checklist);
    let done_count = parse_completed_count(&row.completed_count);

    let tasks = if items.is_empty() {
        // No checklist: one execution task carrying the row's own status.
        let title_base: String = name.chars().take(180).collect();
        vec![MappedTask {
            title: format!("Execução: {}", title_base),
            description: description.as_deref().map(|d| truncate_chars(d, 500)),
            assignee: owner.clone(),
            status: row_status,
            priority,
            deadline: end_date,
        }]
    } else {
        let stage: String = name.chars().take(100).collect();
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                // Assignees rotate through the row's assigned-to list.
                let assignee = if assignees.is_empty() {
                    owner.clone()
                } else {
                    Some(assignees[i % assignees.len()].clone())
                };

                MappedTask {
                    title: truncate_chars(&item.title, 200),
                    description: Some(format!("Etapa: {}", stage)),
                    assignee,
                    status: checklist_item_status(i, done_count, row_status),
                    priority,
                    deadline: item.deadline.or(end_date),
                }
            })
            .collect()
    };

    Some(MappedProject {
        name: name.to_string(),
        description,
        owner,
        start_date,
        end_date,
        status,
        progress,
        tasks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_progress_vocabulary() {
        assert_eq!(progress_to_task_status("Não iniciado"), TaskStatus::Todo);
        assert_eq!(progress_to_task_status("Em andamento"), TaskStatus::InProgress);
        assert_eq!(progress_to_task_status("Concluída"), TaskStatus::Done);
        assert_eq!(progress_to_task_status("???"), TaskStatus::Todo);

        assert_eq!(progress_to_percent("Não iniciado"), 0.0);
        assert_eq!(progress_to_percent("Em andamento"), 50.0);
        assert_eq!(progress_to_percent("Concluída"), 100.0);
        assert_eq!(progress_to_percent("???"), 0.0);
    }

    #[test]
    fn test_bucket_vocabulary() {
        assert_eq!(
            bucket_to_project_status("Aguardando material base"),
            ProjectStatus::Planning
        );
        assert_eq!(
            bucket_to_project_status("Projetos cancelados/suspensos"),
            ProjectStatus::Cancelled
        );
        assert_eq!(bucket_to_project_status("Desenvolvimento"), ProjectStatus::Active);
        assert_eq!(bucket_to_project_status("unknown bucket"), ProjectStatus::Active);
    }

    #[test]
    fn test_priority_vocabulary() {
        assert_eq!(priority_from_label("Urgente"), TaskPriority::Critical);
        assert_eq!(priority_from_label("Importante"), TaskPriority::High);
        assert_eq!(priority_from_label("Média"), TaskPriority::Medium);
        assert_eq!(priority_from_label("Baixa"), TaskPriority::Low);
        assert_eq!(priority_from_label(""), TaskPriority::Medium);
    }

    #[test]
    fn test_parse_completed_count() {
        assert_eq!(parse_completed_count("3/7"), 3);
        assert_eq!(parse_completed_count("0/5"), 0);
        assert_eq!(parse_completed_count(""), 0);
        assert_eq!(parse_completed_count("nan"), 0);
        assert_eq!(parse_completed_count("x/y"), 0);
    }

    #[test]
    fn test_parse_planner_date_formats() {
        assert_eq!(parse_planner_date("15/03/2025"), Some(date(2025, 3, 15)));
        assert_eq!(parse_planner_date("2025-03-15"), Some(date(2025, 3, 15)));
        assert_eq!(parse_planner_date("15-03-2025"), Some(date(2025, 3, 15)));
        assert_eq!(parse_planner_date(""), None);
        assert_eq!(parse_planner_date("nan"), None);
        assert_eq!(parse_planner_date("not a date"), None);
    }

    #[test]
    fn test_checklist_item_deadline_prefix() {
        let item = parse_checklist_item("10/3 - Gravar videoaulas");
        assert_eq!(item.title, "Gravar videoaulas");
        // Month 3 is in the first half, so the year is 2026.
        assert_eq!(item.deadline, Some(date(2026, 3, 10)));

        let item = parse_checklist_item("20/11 - Revisar roteiro");
        assert_eq!(item.deadline, Some(date(2025, 11, 20)));

        let item = parse_checklist_item("Sem prazo definido");
        assert_eq!(item.title, "Sem prazo definido");
        assert_eq!(item.deadline, None);

        // A long prefix is part of the title, not a date.
        let item = parse_checklist_item("Upload BDOC - Files e Scorm");
        assert_eq!(item.title, "Upload BDOC - Files e Scorm");
        assert_eq!(item.deadline, None);
    }

    #[test]
    fn test_split_checklist_drops_blanks() {
        let items = split_checklist("Roteiro; ;Gravação;nan;Edição");
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Roteiro", "Gravação", "Edição"]);
    }

    #[test]
    fn test_checklist_item_status_progression() {
        // 2 of 4 done on an in-progress row.
        let row = TaskStatus::InProgress;
        assert_eq!(checklist_item_status(0, 2, row), TaskStatus::Done);
        assert_eq!(checklist_item_status(1, 2, row), TaskStatus::Done);
        assert_eq!(checklist_item_status(2, 2, row), TaskStatus::InProgress);
        assert_eq!(checklist_item_status(3, 2, row), TaskStatus::Todo);

        // A done row completes everything.
        assert_eq!(checklist_item_status(3, 0, TaskStatus::Done), TaskStatus::Done);

        // A todo row starts nothing beyond the counted items.
        assert_eq!(checklist_item_status(1, 1, TaskStatus::Todo), TaskStatus::Todo);
    }

    #[test]
    fn test_build_description_assembly() {
        let desc = build_description("Curso EAD", "NR-10, Elétrica", "Desenvolvimento").unwrap();
        assert_eq!(desc, "Curso EAD\n\nRótulos: NR-10, Elétrica\n\nFase: Desenvolvimento");

        let desc = build_description("", "", "Autoria digital").unwrap();
        assert_eq!(desc, "Fase: Autoria digital");

        assert_eq!(build_description("", "nan", ""), None);
    }

    #[test]
    fn test_build_description_truncates() {
        let long = "x".repeat(5000);
        let desc = build_description(&long, "", "").unwrap();
        assert_eq!(desc.chars().count(), 2000);
    }

    #[test]
    fn test_email_slug_folds_diacritics() {
        assert_eq!(
            email_slug("Mariana Ribeiro Gonçalves"),
            "mariana.ribeiro.goncalves"
        );
        assert_eq!(email_slug("Fátima Satsuki de Araújo"), "fatima.satsuki.de.araujo");
        assert_eq!(email_slug("José"), "jose");
    }

    #[test]
    fn test_assign_email_dedupes_with_suffix() {
        let mut used = HashSet::new();

        let first = assign_email("Ana Silva", &mut used);
        assert_eq!(first, format!("ana.silva@{}", EMAIL_DOMAIN));

        let second = assign_email("Ana Silva", &mut used);
        assert_eq!(second, format!("ana.silva1@{}", EMAIL_DOMAIN));

        let third = assign_email("Ana Silva", &mut used);
        assert_eq!(third, format!("ana.silva2@{}", EMAIL_DOMAIN));
    }

    #[test]
    fn test_collect_people_dedupes_across_fields() {
        let rows = vec![
            PlannerRow {
                created_by: "Ana Silva".to_string(),
                assigned_to: "Bruno Costa;Ana Silva".to_string(),
                completed_by: "Carla Dias".to_string(),
                ..Default::default()
            },
            PlannerRow {
                created_by: "Bruno Costa".to_string(),
                ..Default::default()
            },
        ];

        let people: Vec<String> = collect_people(&rows).into_iter().collect();
        assert_eq!(people, vec!["Ana Silva", "Bruno Costa", "Carla Dias"]);
    }

    #[test]
    fn test_map_row_skips_blank_names() {
        assert!(map_row(&PlannerRow::default()).is_none());
        assert!(map_row(&PlannerRow {
            name: "nan".to_string(),
            ..Default::default()
        })
        .is_none());
    }

    #[test]
    fn test_map_row_without_checklist() {
        let row = PlannerRow {
            name: "Curso NR-35".to_string(),
            bucket: "Desenvolvimento".to_string(),
            progress: "Em andamento".to_string(),
            priority: "Importante".to_string(),
            assigned_to: "Ana Silva".to_string(),
            end_date: "01/12/2025".to_string(),
            ..Default::default()
        };

        let project = map_row(&row).unwrap();
        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(project.progress, 50.0);
        assert_eq!(project.owner.as_deref(), Some("Ana Silva"));

        assert_eq!(project.tasks.len(), 1);
        let task = &project.tasks[0];
        assert_eq!(task.title, "Execução: Curso NR-35");
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.deadline, Some(date(2025, 12, 1)));
    }

    #[test]
    fn test_map_row_explodes_checklist_and_rotates_assignees() {
        let row = PlannerRow {
            name: "Curso NR-10".to_string(),
            progress: "Em andamento".to_string(),
            assigned_to: "Ana Silva;Bruno Costa".to_string(),
            checklist: "Roteiro;Gravação;10/2 - Edição;Publicação".to_string(),
            completed_count: "1/4".to_string(),
            ..Default::default()
        };

        let project = map_row(&row).unwrap();
        assert_eq!(project.tasks.len(), 4);

        let statuses: Vec<TaskStatus> = project.tasks.iter().map(|t| t.status).collect();
        assert_eq!(
            statuses,
            vec![
                TaskStatus::Done,
                TaskStatus::InProgress,
                TaskStatus::Todo,
                TaskStatus::Todo
            ]
        );

        let assignees: Vec<Option<&str>> =
            project.tasks.iter().map(|t| t.assignee.as_deref()).collect();
        assert_eq!(
            assignees,
            vec![
                Some("Ana Silva"),
                Some("Bruno Costa"),
                Some("Ana Silva"),
                Some("Bruno Costa")
            ]
        );

        assert_eq!(project.tasks[2].deadline, Some(date(2026, 2, 10)));
        assert!(project.tasks[0].description.as_deref().unwrap().starts_with("Etapa: "));
    }

    #[test]
    fn test_map_row_done_forces_completed_project() {
        let row = PlannerRow {
            name: "Curso finalizado".to_string(),
            bucket: "Aguardando material base".to_string(),
            progress: "Concluída".to_string(),
            checklist: "Única etapa".to_string(),
            completed_count: "0/1".to_string(),
            ..Default::default()
        };

        let project = map_row(&row).unwrap();
        // The progress label wins over the bucket.
        assert_eq!(project.status, ProjectStatus::Completed);
        assert_eq!(project.progress, 100.0);
        assert_eq!(project.tasks[0].status, TaskStatus::Done);
    }

    #[test]
    fn test_map_row_owner_falls_back_to_creator() {
        let row = PlannerRow {
            name: "Sem atribuição".to_string(),
            created_by: "Carla Dias".to_string(),
            ..Default::default()
        };

        let project = map_row(&row).unwrap();
        assert_eq!(project.owner.as_deref(), Some("Carla Dias"));
    }
}
