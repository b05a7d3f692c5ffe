// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

use super::m20260101_000001_create_projects::Projects;

/// 创建快照表
///
/// 快照依附于项目，删除项目时级联删除
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Snapshots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Snapshots::Id)
                            .string_len(50)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Snapshots::ProjectId).string_len(50).not_null())
                    .col(ColumnDef::new(Snapshots::Timestamp).big_integer().not_null())
                    .col(ColumnDef::new(Snapshots::Score).integer().not_null())
                    .col(ColumnDef::new(Snapshots::RankPosition).integer().not_null())
                    .col(ColumnDef::new(Snapshots::PageNumber).integer().not_null())
                    .col(ColumnDef::new(Snapshots::MetaTitle).text().not_null())
                    .col(ColumnDef::new(Snapshots::MetaDescription).text().not_null())
                    .col(ColumnDef::new(Snapshots::H1Tag).text().not_null())
                    .col(ColumnDef::new(Snapshots::AltTexts).text().not_null())
                    .col(ColumnDef::new(Snapshots::TopKeywords).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_snapshots_project_id")
                            .from(Snapshots::Table, Snapshots::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // History is always read per project, newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_snapshots_project_timestamp")
                    .table(Snapshots::Table)
                    .col(Snapshots::ProjectId)
                    .col(Snapshots::Timestamp)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Snapshots::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Snapshots {
    Table,
    Id,
    ProjectId,
    Timestamp,
    Score,
    RankPosition,
    PageNumber,
    MetaTitle,
    MetaDescription,
    H1Tag,
    AltTexts,
    TopKeywords,
}
