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
                    .as_enum(RoleType::Enum)
                    .values([
                        RoleType::RoleAdmin,
                        RoleType::RoleFuncionario,
                        RoleType::RoleUsuario,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(pk_uuid(Roles::Id))
                    .col(
                        ColumnDef::new(Roles::RoleName)
                            .enumeration(
                                RoleType::Enum,
                                [
                                    RoleType::RoleAdmin,
                                    RoleType::RoleFuncionario,
                                    RoleType::RoleUsuario,
                                ],
                            )
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_roles_role_name")
                    .table(Roles::Table)
                    .col(Roles::RoleName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Read-only for the service; every new user is linked to ROLE_USUARIO.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                INSERT INTO roles (id, role_name)
                VALUES
                    ('0193f1a0-0000-7000-8000-000000000001', 'ROLE_ADMIN'),
                    ('0193f1a0-0000-7000-8000-000000000002', 'ROLE_FUNCIONARIO'),
                    ('0193f1a0-0000-7000-8000-000000000003', 'ROLE_USUARIO')
                ON CONFLICT (role_name) DO NOTHING
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(RoleType::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Id,
    RoleName,
}

#[derive(DeriveIden)]
enum RoleType {
    #[sea_orm(iden = "role_type")]
    Enum,
    #[sea_orm(iden = "ROLE_ADMIN")]
    RoleAdmin,
    #[sea_orm(iden = "ROLE_FUNCIONARIO")]
    RoleFuncionario,
    #[sea_orm(iden = "ROLE_USUARIO")]
    RoleUsuario,
}
