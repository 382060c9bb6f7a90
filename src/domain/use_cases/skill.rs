use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::HOME_SKILLS,
    entities::skill::{
        group_skills, NewSkillRequest, Skill, SkillApiItem, SkillCategory, SkillGroup, SkillInsert,
        SkillsResponse, UpdateSkillRequest,
    },
    errors::AppError,
    repositories::skill::SkillRepository,
};

pub struct SkillHandler {
    pub skill_repo: Arc<dyn SkillRepository>,
}

impl SkillHandler {
    pub fn new(skill_repo: Arc<dyn SkillRepository>) -> Self {
        SkillHandler { skill_repo }
    }

    /// First skills in default order, for the home page strip.
    pub async fn highlighted(&self) -> Result<Vec<Skill>, AppError> {
        self.skill_repo.list_skills(None, Some(HOME_SKILLS)).await
    }

    /// Every skill grouped under its category label.
    pub async fn grouped(&self) -> Result<Vec<SkillGroup>, AppError> {
        let skills = self.skill_repo.list_skills(None, None).await?;
        Ok(group_skills(skills))
    }

    pub async fn api_listing(&self) -> Result<SkillsResponse, AppError> {
        let skills = self.skill_repo.list_skills(None, None).await?;

        Ok(SkillsResponse {
            skills: skills.into_iter().map(SkillApiItem::from).collect(),
        })
    }

    pub async fn list(&self, category: Option<SkillCategory>) -> Result<Vec<Skill>, AppError> {
        self.skill_repo.list_skills(category, None).await
    }

    pub async fn get(&self, id: &Uuid) -> Result<Skill, AppError> {
        self.skill_repo.get_skill(id).await
    }

    pub async fn create(&self, request: NewSkillRequest) -> Result<Skill, AppError> {
        request.validate()?;
        self.skill_repo.create_skill(&SkillInsert::from(request)).await
    }

    pub async fn update(&self, id: &Uuid, request: UpdateSkillRequest) -> Result<Skill, AppError> {
        request.validate()?;
        self.skill_repo.update_skill(id, &request).await
    }

    pub async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        self.skill_repo.delete_skill(id).await
    }
}
