// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::project::{Project, ProjectSnapshot, ProjectType};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// `POST /projects` 请求体
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequestDto {
    #[validate(length(min = 1, max = 50))]
    pub id: String,
    #[validate(length(min = 1))]
    pub url: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(max = 50))]
    pub country: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    #[validate(range(min = 0))]
    pub last_checked: i64,
    #[serde(default)]
    pub tracked_keywords: Vec<String>,
}

impl From<ProjectRequestDto> for Project {
    fn from(dto: ProjectRequestDto) -> Self {
        Project {
            id: dto.id,
            url: dto.url,
            name: dto.name,
            country: dto.country,
            project_type: dto.project_type,
            last_checked: dto.last_checked,
            tracked_keywords: dto.tracked_keywords,
            history: Vec::new(),
        }
    }
}

/// `POST /snapshots` 请求体
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRequestDto {
    #[validate(length(min = 1, max = 50))]
    pub id: String,
    #[validate(length(min = 1, max = 50))]
    pub project_id: String,
    #[validate(range(min = 0))]
    pub timestamp: i64,
    #[validate(range(min = 0, max = 100))]
    pub score: i32,
    #[validate(range(min = 1))]
    pub rank: i32,
    #[validate(range(min = 1))]
    pub page: i32,
    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub h1_tag: String,
    #[serde(default)]
    pub alt_texts: Vec<String>,
    #[serde(default)]
    pub top_keywords: Vec<String>,
}

impl From<SnapshotRequestDto> for ProjectSnapshot {
    fn from(dto: SnapshotRequestDto) -> Self {
        ProjectSnapshot {
            id: dto.id,
            project_id: dto.project_id,
            timestamp: dto.timestamp,
            score: dto.score,
            rank: dto.rank,
            page: dto.page,
            meta_title: dto.meta_title,
            meta_description: dto.meta_description,
            h1_tag: dto.h1_tag,
            alt_texts: dto.alt_texts,
            top_keywords: dto.top_keywords,
        }
    }
}
