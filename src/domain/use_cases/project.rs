use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{HOME_FEATURED_PROJECTS, PROJECTS_PER_PAGE, RELATED_PROJECTS},
    entities::{
        pagination::{Page, PageWindow},
        project::{
            category_options, CategoryOption, CategorySelection, NewProjectRequest, Project,
            ProjectFilter, ProjectInsert, ProjectView, UpdateProjectRequest,
        },
    },
    errors::AppError,
    infrastructure::utils::markdown::safe_markdown_to_html,
    repositories::project::ProjectRepository,
};

#[derive(Debug, Serialize)]
pub struct ProjectListing {
    pub page: Page<ProjectView>,
    pub categories: Vec<CategoryOption>,
    pub current_category: String,
}

#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    pub project: ProjectView,
    pub description_html: String,
    pub related_projects: Vec<ProjectView>,
}

pub struct ProjectHandler {
    pub project_repo: Arc<dyn ProjectRepository>,
}

impl ProjectHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepository>) -> Self {
        ProjectHandler { project_repo }
    }

    pub async fn featured(&self) -> Result<Vec<ProjectView>, AppError> {
        let filter = ProjectFilter {
            featured: Some(true),
            ..ProjectFilter::default()
        };
        let projects = self
            .project_repo
            .list_projects(&filter, Some(HOME_FEATURED_PROJECTS), 0)
            .await?;

        Ok(projects.into_iter().map(ProjectView::from).collect())
    }

    /// Public listing: optional category filter plus clamped pagination.
    pub async fn list_page(&self, category: Option<&str>, page: Option<&str>) -> Result<ProjectListing, AppError> {
        let selection = CategorySelection::parse(category);
        let current_category = selection.token().to_string();

        let category = match selection {
            CategorySelection::All => None,
            CategorySelection::Category(category) => Some(category),
            CategorySelection::Unmatched(_) => {
                return Ok(ProjectListing {
                    page: Page::empty(PROJECTS_PER_PAGE),
                    categories: category_options(),
                    current_category,
                });
            }
        };

        let filter = ProjectFilter {
            category,
            ..ProjectFilter::default()
        };

        let total = self.project_repo.count_projects(&filter).await?;
        let window = PageWindow::resolve(page, total, PROJECTS_PER_PAGE);
        let projects = self
            .project_repo
            .list_projects(&filter, Some(window.per_page), window.offset())
            .await?;

        Ok(ProjectListing {
            page: Page::new(projects.into_iter().map(ProjectView::from).collect(), window, total),
            categories: category_options(),
            current_category,
        })
    }

    pub async fn detail(&self, slug: &str) -> Result<ProjectDetail, AppError> {
        let project = self.project_repo.get_project_by_slug(slug).await?;
        let related = self
            .project_repo
            .related_projects(project.category, &project.id, RELATED_PROJECTS)
            .await?;

        Ok(ProjectDetail {
            description_html: safe_markdown_to_html(&project.description),
            project: project.into(),
            related_projects: related.into_iter().map(ProjectView::from).collect(),
        })
    }

    pub async fn list(&self, filter: &ProjectFilter) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_projects(filter, None, 0).await
    }

    pub async fn get(&self, id: &Uuid) -> Result<Project, AppError> {
        self.project_repo.get_project_by_id(id).await
    }

    pub async fn create(&self, request: NewProjectRequest) -> Result<Project, AppError> {
        let insert = ProjectInsert::try_from(request)?;
        let project = self.project_repo.create_project(&insert).await?;

        tracing::info!(project_id = %project.id, slug = %project.slug, "Project created");
        Ok(project)
    }

    pub async fn update(&self, id: &Uuid, request: UpdateProjectRequest) -> Result<Project, AppError> {
        request.validate()?;
        self.project_repo.update_project(id, &request).await
    }

    pub async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        self.project_repo.delete_project(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::project::ProjectCategory;
    use crate::repositories::project::MockProjectRepository;
    use crate::test_support::sample_project;

    #[tokio::test]
    async fn unknown_category_is_echoed_with_empty_page() {
        let mut repo = MockProjectRepository::new();
        repo.expect_count_projects().never();
        repo.expect_list_projects().never();

        let listing = ProjectHandler::new(Arc::new(repo))
            .list_page(Some("games"), Some("3"))
            .await
            .unwrap();

        assert_eq!(listing.current_category, "games");
        assert!(listing.page.items.is_empty());
        assert_eq!(listing.page.num_pages, 1);
        assert_eq!(listing.categories.len(), 3);
    }

    #[tokio::test]
    async fn category_filter_and_clamped_page_reach_repository() {
        let mut repo = MockProjectRepository::new();
        repo.expect_count_projects()
            .withf(|f| f.category == Some(ProjectCategory::Mobile))
            .returning(|_| Ok(20));
        repo.expect_list_projects()
            .withf(|f, limit, offset| {
                f.category == Some(ProjectCategory::Mobile) && *limit == Some(9) && *offset == 18
            })
            .returning(|_, _, _| Ok(vec![sample_project("Last", ProjectCategory::Mobile)]));

        let listing = ProjectHandler::new(Arc::new(repo))
            .list_page(Some("mobile"), Some("42"))
            .await
            .unwrap();

        assert_eq!(listing.page.number, 3);
        assert_eq!(listing.page.items.len(), 1);
        assert_eq!(listing.current_category, "mobile");
    }

    #[tokio::test]
    async fn absent_category_is_all() {
        let mut repo = MockProjectRepository::new();
        repo.expect_count_projects()
            .withf(|f| f.category.is_none())
            .returning(|_| Ok(0));
        repo.expect_list_projects().returning(|_, _, _| Ok(Vec::new()));

        let listing = ProjectHandler::new(Arc::new(repo))
            .list_page(None, Some("abc"))
            .await
            .unwrap();

        assert_eq!(listing.current_category, "all");
        assert_eq!(listing.page.number, 1);
    }

    #[tokio::test]
    async fn detail_renders_markdown_and_related() {
        let project = sample_project("Main", ProjectCategory::Web);
        let project_id = project.id;

        let mut repo = MockProjectRepository::new();
        repo.expect_get_project_by_slug()
            .returning(move |_| Ok(project.clone()));
        repo.expect_related_projects()
            .withf(move |category, exclude, limit| {
                *category == ProjectCategory::Web && *exclude == project_id && *limit == 3
            })
            .returning(|_, _, _| {
                Ok(vec![
                    sample_project("A", ProjectCategory::Web),
                    sample_project("B", ProjectCategory::Web),
                ])
            });

        let detail = ProjectHandler::new(Arc::new(repo)).detail("main").await.unwrap();

        assert!(detail.description_html.contains("<strong>"));
        assert_eq!(detail.related_projects.len(), 2);
    }

    #[tokio::test]
    async fn missing_slug_is_not_found() {
        let mut repo = MockProjectRepository::new();
        repo.expect_get_project_by_slug()
            .returning(|_| Err(AppError::NotFound("Project not found".into())));

        let result = ProjectHandler::new(Arc::new(repo)).detail("nope").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
