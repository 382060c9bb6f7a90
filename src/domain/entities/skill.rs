use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::{
    option_fields::OptionField,
    validation::{required, validate_not_null, validate_required_field},
};

pub const MIN_PROFICIENCY: i16 = 1;
pub const MAX_PROFICIENCY: i16 = 5;
pub const DEFAULT_PROFICIENCY: i64 = 3;
pub const DEFAULT_ICON: &str = "fas fa-code";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "skill_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    #[default]
    Backend,
    Frontend,
    Mobile,
    Devops,
    Tools,
    Database,
}

impl SkillCategory {
    pub fn code(&self) -> &'static str {
        match self {
            SkillCategory::Backend => "backend",
            SkillCategory::Frontend => "frontend",
            SkillCategory::Mobile => "mobile",
            SkillCategory::Devops => "devops",
            SkillCategory::Tools => "tools",
            SkillCategory::Database => "database",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkillCategory::Backend => "Backend",
            SkillCategory::Frontend => "Frontend",
            SkillCategory::Mobile => "Mobile",
            SkillCategory::Devops => "DevOps",
            SkillCategory::Tools => "Tools",
            SkillCategory::Database => "Database",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub category: SkillCategory,
    pub proficiency: i16,
    pub icon: String,
    pub order: i32,
}

/// Out-of-range levels are pulled to the nearest bound instead of rejected.
pub fn clamp_proficiency(value: i64) -> i16 {
    value.clamp(MIN_PROFICIENCY as i64, MAX_PROFICIENCY as i64) as i16
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillGroup {
    pub category: SkillCategory,
    pub label: &'static str,
    pub skills: Vec<Skill>,
}

/// Groups by category label, in order of first appearance; skills keep
/// their relative order inside each group.
pub fn group_skills(skills: Vec<Skill>) -> Vec<SkillGroup> {
    let mut groups: Vec<SkillGroup> = Vec::new();

    for skill in skills {
        let label = skill.category.label();
        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.skills.push(skill),
            None => groups.push(SkillGroup {
                category: skill.category,
                label,
                skills: vec![skill],
            }),
        }
    }

    groups
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillApiItem {
    pub name: String,
    pub category: &'static str,
    pub category_display: &'static str,
    pub proficiency: i16,
    pub icon: String,
}

impl From<Skill> for SkillApiItem {
    fn from(skill: Skill) -> Self {
        SkillApiItem {
            category: skill.category.code(),
            category_display: skill.category.label(),
            name: skill.name,
            proficiency: skill.proficiency,
            icon: skill.icon,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub skills: Vec<SkillApiItem>,
}

fn default_proficiency() -> i64 {
    DEFAULT_PROFICIENCY
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewSkillRequest {
    #[validate(
        length(max = 100, message = "Name must be at most 100 characters"),
        custom(function = "required")
    )]
    pub name: String,

    #[serde(default)]
    pub category: SkillCategory,

    #[serde(default = "default_proficiency")]
    pub proficiency: i64,

    #[serde(default = "default_icon")]
    #[validate(length(max = 50, message = "Icon must be at most 50 characters"))]
    pub icon: String,

    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone)]
pub struct SkillInsert {
    pub name: String,
    pub category: SkillCategory,
    pub proficiency: i16,
    pub icon: String,
    pub order: i32,
}

impl From<NewSkillRequest> for SkillInsert {
    fn from(value: NewSkillRequest) -> Self {
        let icon = value.icon.trim();
        SkillInsert {
            name: value.name.trim().to_string(),
            category: value.category,
            proficiency: clamp_proficiency(value.proficiency),
            icon: if icon.is_empty() { DEFAULT_ICON.to_string() } else { icon.to_string() },
            order: value.order,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateSkillRequest {
    #[validate(
        length(max = 100, message = "Name must be at most 100 characters"),
        custom(function = "validate_required_field")
    )]
    pub name: OptionField<String>,

    #[validate(custom(function = "validate_not_null"))]
    pub category: OptionField<SkillCategory>,

    #[validate(custom(function = "validate_not_null"))]
    pub proficiency: OptionField<i64>,

    #[validate(
        length(max = 50, message = "Icon must be at most 50 characters"),
        custom(function = "validate_not_null")
    )]
    pub icon: OptionField<String>,

    #[validate(custom(function = "validate_not_null"))]
    pub order: OptionField<i32>,
}

impl UpdateSkillRequest {
    pub fn clamped_proficiency(&self) -> OptionField<i16> {
        self.proficiency.clone().map_value(clamp_proficiency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(name: &str, category: SkillCategory) -> Skill {
        Skill {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category,
            proficiency: 3,
            icon: DEFAULT_ICON.to_string(),
            order: 0,
        }
    }

    #[test]
    fn proficiency_is_clamped() {
        assert_eq!(clamp_proficiency(0), 1);
        assert_eq!(clamp_proficiency(-40), 1);
        assert_eq!(clamp_proficiency(4), 4);
        assert_eq!(clamp_proficiency(9), 5);
    }

    #[test]
    fn groups_follow_first_appearance() {
        let skills = vec![
            skill("Django", SkillCategory::Backend),
            skill("React", SkillCategory::Frontend),
            skill("Rust", SkillCategory::Backend),
            skill("Docker", SkillCategory::Devops),
            skill("Vue", SkillCategory::Frontend),
        ];

        let groups = group_skills(skills);

        let labels: Vec<_> = groups.iter().map(|g| g.label).collect();
        assert_eq!(labels, vec!["Backend", "Frontend", "DevOps"]);

        let backend: Vec<_> = groups[0].skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(backend, vec!["Django", "Rust"]);

        let frontend: Vec<_> = groups[1].skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(frontend, vec!["React", "Vue"]);
    }

    #[test]
    fn empty_input_has_no_groups() {
        assert!(group_skills(Vec::new()).is_empty());
    }

    #[test]
    fn new_skill_defaults() {
        let request: NewSkillRequest = serde_json::from_str(r#"{"name": "Rust", "proficiency": 11}"#).unwrap();
        let insert = SkillInsert::from(request);

        assert_eq!(insert.category, SkillCategory::Backend);
        assert_eq!(insert.proficiency, 5);
        assert_eq!(insert.icon, "fas fa-code");
    }

    #[test]
    fn api_item_uses_code_and_label() {
        let item = SkillApiItem::from(skill("Kubernetes", SkillCategory::Devops));

        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            serde_json::json!({
                "name": "Kubernetes",
                "category": "devops",
                "category_display": "DevOps",
                "proficiency": 3,
                "icon": "fas fa-code"
            })
        );
    }
}
