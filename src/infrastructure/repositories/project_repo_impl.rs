// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::project::{
    decode_string_list, encode_string_list, Project, ProjectSnapshot,
};
use crate::domain::repositories::project_repository::{ProjectRepository, RepositoryError};
use crate::infrastructure::database::entities::{project as project_entity, snapshot as snapshot_entity};
use async_trait::async_trait;
use sea_orm::{sea_query::OnConflict, *};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// 项目仓库实现
pub struct ProjectRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl ProjectRepositoryImpl {
    /// 创建新的项目仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn project_from_model(m: project_entity::Model) -> Result<Project, RepositoryError> {
    Ok(Project {
        project_type: m.project_type.parse()?,
        tracked_keywords: decode_string_list("tracked_keywords", &m.tracked_keywords)?,
        id: m.id,
        url: m.url,
        name: m.name,
        country: m.country,
        last_checked: m.last_checked,
        history: Vec::new(),
    })
}

fn snapshot_from_model(m: snapshot_entity::Model) -> Result<ProjectSnapshot, RepositoryError> {
    Ok(ProjectSnapshot {
        alt_texts: decode_string_list("alt_texts", &m.alt_texts)?,
        top_keywords: decode_string_list("top_keywords", &m.top_keywords)?,
        id: m.id,
        project_id: m.project_id,
        timestamp: m.timestamp,
        score: m.score,
        rank: m.rank_position,
        page: m.page_number,
        meta_title: m.meta_title,
        meta_description: m.meta_description,
        h1_tag: m.h1_tag,
    })
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[async_trait]
impl ProjectRepository for ProjectRepositoryImpl {
    async fn list_with_history(&self) -> Result<Vec<Project>, RepositoryError> {
        let project_models = project_entity::Entity::find()
            .order_by_desc(project_entity::Column::LastChecked)
            .order_by_asc(project_entity::Column::Id)
            .all(self.db.as_ref())
            .await?;

        // One query for every history instead of one per project
        let snapshot_models = snapshot_entity::Entity::find()
            .order_by_desc(snapshot_entity::Column::Timestamp)
            .order_by_desc(snapshot_entity::Column::Id)
            .all(self.db.as_ref())
            .await?;

        let mut histories: HashMap<String, Vec<ProjectSnapshot>> = HashMap::new();
        for m in snapshot_models {
            let snapshot = snapshot_from_model(m)?;
            histories
                .entry(snapshot.project_id.clone())
                .or_default()
                .push(snapshot);
        }

        project_models
            .into_iter()
            .map(|m| {
                let mut project = project_from_model(m)?;
                project.history = histories.remove(&project.id).unwrap_or_default();
                Ok(project)
            })
            .collect()
    }

    async fn upsert(&self, project: &Project) -> Result<(), RepositoryError> {
        let model = project_entity::ActiveModel {
            id: Set(project.id.clone()),
            url: Set(project.url.clone()),
            name: Set(project.name.clone()),
            country: Set(project.country.clone()),
            project_type: Set(project.project_type.to_string()),
            last_checked: Set(project.last_checked),
            tracked_keywords: Set(encode_string_list(&project.tracked_keywords)),
        };

        project_entity::Entity::insert(model)
            .on_conflict(
                OnConflict::column(project_entity::Column::Id)
                    .update_columns([
                        project_entity::Column::Url,
                        project_entity::Column::Name,
                        project_entity::Column::Country,
                        project_entity::Column::ProjectType,
                        project_entity::Column::LastChecked,
                        project_entity::Column::TrackedKeywords,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await?;

        debug!("Upserted project {}", project.id);
        Ok(())
    }

    async fn append_snapshot(&self, snapshot: &ProjectSnapshot) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;

        if project_entity::Entity::find_by_id(snapshot.project_id.clone())
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(RepositoryError::NotFound(format!(
                "project {}",
                snapshot.project_id
            )));
        }

        if snapshot_entity::Entity::find_by_id(snapshot.id.clone())
            .one(&txn)
            .await?
            .is_some()
        {
            return Err(RepositoryError::Conflict(format!("snapshot {}", snapshot.id)));
        }

        let model = snapshot_entity::ActiveModel {
            id: Set(snapshot.id.clone()),
            project_id: Set(snapshot.project_id.clone()),
            timestamp: Set(snapshot.timestamp),
            score: Set(snapshot.score),
            rank_position: Set(snapshot.rank),
            page_number: Set(snapshot.page),
            meta_title: Set(snapshot.meta_title.clone()),
            meta_description: Set(snapshot.meta_description.clone()),
            h1_tag: Set(snapshot.h1_tag.clone()),
            alt_texts: Set(encode_string_list(&snapshot.alt_texts)),
            top_keywords: Set(encode_string_list(&snapshot.top_keywords)),
        };

        snapshot_entity::Entity::insert(model)
            .exec_without_returning(&txn)
            .await
            .map_err(|e| {
                // Lost a race with a concurrent insert of the same id
                if is_unique_violation(&e) {
                    RepositoryError::Conflict(format!("snapshot {}", snapshot.id))
                } else {
                    RepositoryError::Database(e)
                }
            })?;

        txn.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, RepositoryError> {
        let txn = self.db.begin().await?;

        let removed_snapshots = snapshot_entity::Entity::delete_many()
            .filter(snapshot_entity::Column::ProjectId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        let removed = project_entity::Entity::delete_by_id(id.to_string())
            .exec(&txn)
            .await?
            .rows_affected;

        txn.commit().await?;

        debug!(
            "Deleted project {} ({} snapshots removed)",
            id, removed_snapshots
        );
        Ok(removed > 0)
    }

    async fn count_snapshots(&self, project_id: &str) -> Result<u64, RepositoryError> {
        let count = snapshot_entity::Entity::find()
            .filter(snapshot_entity::Column::ProjectId.eq(project_id))
            .count(self.db.as_ref())
            .await?;
        Ok(count)
    }
}
