use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(ProfileType::Enum)
                    .values([ProfileType::Usuario, ProfileType::Admin])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(UserStatus::Enum)
                    .values([UserStatus::Ativo, UserStatus::Inativo, UserStatus::Bloqueado])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_uuid(Users::Id))
                    .col(string(Users::Email))
                    .col(string_len(Users::Name, 50))
                    .col(string(Users::Password))
                    .col(
                        ColumnDef::new(Users::ProfileType)
                            .enumeration(
                                ProfileType::Enum,
                                [ProfileType::Usuario, ProfileType::Admin],
                            )
                            .not_null()
                            .default("USUARIO"),
                    )
                    .col(
                        ColumnDef::new(Users::UserStatus)
                            .enumeration(
                                UserStatus::Enum,
                                [UserStatus::Ativo, UserStatus::Inativo, UserStatus::Bloqueado],
                            )
                            .not_null()
                            .default("ATIVO"),
                    )
                    .col(timestamp_with_time_zone(Users::CreatedAt))
                    .col(timestamp_with_time_zone(Users::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // The constraint names are matched when a concurrent insert loses the race.
        manager
            .create_index(
                Index::create()
                    .name("uq_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_users_name")
                    .table(Users::Table)
                    .col(Users::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_created_at")
                    .table(Users::Table)
                    .col(Users::CreatedAt)
                    .col(Users::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(UserStatus::Enum).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(ProfileType::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    Name,
    Password,
    ProfileType,
    UserStatus,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProfileType {
    #[sea_orm(iden = "profile_type")]
    Enum,
    #[sea_orm(iden = "USUARIO")]
    Usuario,
    #[sea_orm(iden = "ADMIN")]
    Admin,
}

#[derive(DeriveIden)]
enum UserStatus {
    #[sea_orm(iden = "user_status")]
    Enum,
    #[sea_orm(iden = "ATIVO")]
    Ativo,
    #[sea_orm(iden = "INATIVO")]
    Inativo,
    #[sea_orm(iden = "BLOQUEADO")]
    Bloqueado,
}
