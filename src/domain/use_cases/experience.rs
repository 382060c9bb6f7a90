use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::{
        experience::{Experience, ExperienceView, NewExperienceRequest, UpdateExperienceRequest},
        option_fields::OptionField,
    },
    errors::AppError,
    repositories::experience::ExperienceRepository,
};

pub struct ExperienceHandler {
    pub experience_repo: Arc<dyn ExperienceRepository>,
}

impl ExperienceHandler {
    pub fn new(experience_repo: Arc<dyn ExperienceRepository>) -> Self {
        ExperienceHandler { experience_repo }
    }

    pub async fn timeline(&self) -> Result<Vec<ExperienceView>, AppError> {
        let experiences = self.experience_repo.list_experiences().await?;
        Ok(experiences.into_iter().map(ExperienceView::from).collect())
    }

    pub async fn list(&self) -> Result<Vec<Experience>, AppError> {
        self.experience_repo.list_experiences().await
    }

    pub async fn get(&self, id: &Uuid) -> Result<Experience, AppError> {
        self.experience_repo.get_experience(id).await
    }

    pub async fn create(&self, request: NewExperienceRequest) -> Result<Experience, AppError> {
        request.validate()?;
        self.experience_repo.create_experience(&request).await
    }

    /// Field rules are checked here; the date ordering against stored
    /// values is checked once the current row is known.
    pub async fn update(&self, id: &Uuid, request: UpdateExperienceRequest) -> Result<Experience, AppError> {
        request.validate()?;

        if request.start_date.value_ref().is_some() || request.end_date.value_ref().is_some() {
            let current = self.experience_repo.get_experience(id).await?;
            let start = request.start_date.value_ref().copied().unwrap_or(current.start_date);
            let end = match &request.end_date {
                OptionField::Unchanged => current.end_date,
                other => other.value_ref().copied(),
            };

            if end.is_some_and(|end| end < start) {
                return Err(AppError::field("end_date", "End date cannot be before the start date"));
            }
        }

        self.experience_repo.update_experience(id, &request).await
    }

    pub async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        self.experience_repo.delete_experience(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::experience::MockExperienceRepository;
    use crate::test_support::sample_experience;

    #[tokio::test]
    async fn timeline_adds_period() {
        let mut repo = MockExperienceRepository::new();
        repo.expect_list_experiences()
            .returning(|| Ok(vec![sample_experience("Engineer")]));

        let timeline = ExperienceHandler::new(Arc::new(repo)).timeline().await.unwrap();

        assert_eq!(timeline[0].period, "Jan 2021 - Present");
    }

    #[tokio::test]
    async fn patch_with_end_before_stored_start_is_rejected() {
        let mut repo = MockExperienceRepository::new();
        repo.expect_get_experience()
            .returning(|_| Ok(sample_experience("Engineer")));
        repo.expect_update_experience().never();

        let request: UpdateExperienceRequest =
            serde_json::from_str(r#"{"end_date": "2020-01-01"}"#).unwrap();

        let result = ExperienceHandler::new(Arc::new(repo))
            .update(&Uuid::new_v4(), request)
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
