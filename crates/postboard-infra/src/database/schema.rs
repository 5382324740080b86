//! Table definitions for the `query` strategy.
//!
//! These mirror the SeaORM entities column for column, so either strategy can
//! open a database created by the other.

use sea_orm::DeriveIden;
use sea_orm::sea_query::{ColumnDef, ForeignKey, ForeignKeyAction, Table, TableCreateStatement};

#[derive(DeriveIden, Clone, Copy)]
pub enum Posts {
    Table,
    Id,
    Title,
    Content,
    PublicationDate,
}

#[derive(DeriveIden, Clone, Copy)]
pub enum Comments {
    Table,
    Id,
    PostId,
    Content,
    PublicationDate,
}

pub const POST_COLUMNS: [Posts; 4] = [
    Posts::Id,
    Posts::Title,
    Posts::Content,
    Posts::PublicationDate,
];

pub const COMMENT_COLUMNS: [Comments; 4] = [
    Comments::Id,
    Comments::PostId,
    Comments::Content,
    Comments::PublicationDate,
];

pub fn create_posts_table() -> TableCreateStatement {
    Table::create()
        .table(Posts::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Posts::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Posts::Title).string().not_null())
        .col(ColumnDef::new(Posts::Content).text().not_null())
        .col(
            ColumnDef::new(Posts::PublicationDate)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .to_owned()
}

/// Comments are removed together with their post.
pub fn create_comments_table() -> TableCreateStatement {
    Table::create()
        .table(Comments::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Comments::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Comments::PostId).integer().not_null())
        .col(ColumnDef::new(Comments::Content).text().not_null())
        .col(
            ColumnDef::new(Comments::PublicationDate)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk-comments-post_id")
                .from(Comments::Table, Comments::PostId)
                .to(Posts::Table, Posts::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::Cascade),
        )
        .to_owned()
}
