use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create tables in order of dependencies
        self.create_countries_table(manager).await?;
        self.create_timezones_table(manager).await?;
        self.create_genre_colors_table(manager).await?;
        self.create_genres_table(manager).await?;
        self.create_categories_table(manager).await?;
        self.create_rating_values_table(manager).await?;
        self.create_rating_systems_table(manager).await?;
        self.create_networks_table(manager).await?;
        self.create_channels_table(manager).await?;
        self.create_events_table(manager).await?;
        self.create_event_ratings_table(manager).await?;

        // Create indexes
        self.create_indexes(manager).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order
        manager
            .drop_table(Table::drop().table(EventRatings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Channels::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Networks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RatingSystems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RatingValues::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Genres::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GenreColors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Timezones::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Countries::Table).to_owned())
            .await?;

        Ok(())
    }
}

impl Migration {
    // Helper functions for repeated column shapes
    fn create_id_column(&self, column: impl IntoIden) -> ColumnDef {
        let mut col = ColumnDef::new(column);
        col.integer().not_null().auto_increment().primary_key();
        col
    }

    fn create_fixture_id_column(&self, column: impl IntoIden) -> ColumnDef {
        let mut col = ColumnDef::new(column);
        col.integer().not_null().primary_key();
        col
    }

    fn create_timestamp_column(&self, column: impl IntoIden) -> ColumnDef {
        let mut col = ColumnDef::new(column);
        col.timestamp_with_time_zone().not_null();
        col
    }

    // Table creation methods
    async fn create_countries_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Countries::Table)
                    .if_not_exists()
                    .col(self.create_id_column(Countries::Id))
                    .col(
                        ColumnDef::new(Countries::Code)
                            .char_len(2)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Countries::Name).string_len(50).not_null())
                    .col(ColumnDef::new(Countries::Region).string_len(50).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn create_timezones_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Timezones::Table)
                    .if_not_exists()
                    .col(self.create_id_column(Timezones::Id))
                    .col(ColumnDef::new(Timezones::CountryCode).char_len(2).not_null())
                    .col(
                        ColumnDef::new(Timezones::TimezoneName)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Timezones::StandardOffset).integer().not_null())
                    .col(ColumnDef::new(Timezones::DstOffset).integer().not_null())
                    .col(ColumnDef::new(Timezones::DstStartDay).integer().not_null())
                    .col(ColumnDef::new(Timezones::DstStartMonth).integer().not_null())
                    .col(ColumnDef::new(Timezones::DstStartTime).time().not_null())
                    .col(ColumnDef::new(Timezones::DstEndDay).integer().not_null())
                    .col(ColumnDef::new(Timezones::DstEndMonth).integer().not_null())
                    .col(ColumnDef::new(Timezones::DstEndTime).time().not_null())
                    .col(
                        ColumnDef::new(Timezones::IsDefault)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_timezones_country_code")
                            .from(Timezones::Table, Timezones::CountryCode)
                            .to(Countries::Table, Countries::Code)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn create_genre_colors_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GenreColors::Table)
                    .if_not_exists()
                    .col(self.create_id_column(GenreColors::Id))
                    .col(
                        ColumnDef::new(GenreColors::NibbleLevel1)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(GenreColors::ColorHex).text().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn create_genres_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Genres::Table)
                    .if_not_exists()
                    .col(self.create_id_column(Genres::Id))
                    .col(ColumnDef::new(Genres::NibbleLevel1).integer().not_null())
                    .col(ColumnDef::new(Genres::NibbleLevel2).integer().not_null())
                    .col(ColumnDef::new(Genres::Description).text().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn create_categories_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(self.create_id_column(Categories::Id))
                    .col(
                        ColumnDef::new(Categories::Description)
                            .text()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn create_rating_values_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        // No foreign key to rating_systems: values are seeded before their systems
        manager
            .create_table(
                Table::create()
                    .table(RatingValues::Table)
                    .if_not_exists()
                    .col(self.create_fixture_id_column(RatingValues::Id))
                    .col(ColumnDef::new(RatingValues::RatingSystemId).integer().not_null())
                    .col(ColumnDef::new(RatingValues::Value).text().not_null())
                    .col(ColumnDef::new(RatingValues::MinAge).integer().not_null())
                    .col(
                        ColumnDef::new(RatingValues::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn create_rating_systems_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RatingSystems::Table)
                    .if_not_exists()
                    .col(self.create_fixture_id_column(RatingSystems::Id))
                    .col(ColumnDef::new(RatingSystems::CountryId).integer().not_null())
                    .col(
                        ColumnDef::new(RatingSystems::Description)
                            .string_len(100)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rating_systems_country_id")
                            .from(RatingSystems::Table, RatingSystems::CountryId)
                            .to(Countries::Table, Countries::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn create_networks_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Networks::Table)
                    .if_not_exists()
                    .col(self.create_id_column(Networks::Id))
                    .col(ColumnDef::new(Networks::CountryId).integer().not_null())
                    .col(ColumnDef::new(Networks::TimezoneId).integer().not_null())
                    .col(ColumnDef::new(Networks::ServiceId).integer().not_null())
                    .col(ColumnDef::new(Networks::Description).text().not_null())
                    .col(self.create_timestamp_column(Networks::StartTime))
                    .col(self.create_timestamp_column(Networks::FinishTime))
                    .col(
                        ColumnDef::new(Networks::CridDescription)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_networks_country_id")
                            .from(Networks::Table, Networks::CountryId)
                            .to(Countries::Table, Countries::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_networks_timezone_id")
                            .from(Networks::Table, Networks::TimezoneId)
                            .to(Timezones::Table, Timezones::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn create_channels_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Channels::Table)
                    .if_not_exists()
                    .col(self.create_id_column(Channels::Id))
                    .col(ColumnDef::new(Channels::NetworkId).integer().not_null())
                    .col(ColumnDef::new(Channels::Description).text().not_null())
                    .col(self.create_timestamp_column(Channels::BroadcastStartTime))
                    .col(self.create_timestamp_column(Channels::BroadcastFinishTime))
                    .col(ColumnDef::new(Channels::ServiceId).integer().not_null())
                    .col(ColumnDef::new(Channels::ServiceVpid).integer().not_null())
                    .col(ColumnDef::new(Channels::ServiceApid).integer().not_null())
                    .col(ColumnDef::new(Channels::AuthorityMeta).text())
                    .col(ColumnDef::new(Channels::LogoName).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_channels_network_id")
                            .from(Channels::Table, Channels::NetworkId)
                            .to(Networks::Table, Networks::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn create_events_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(self.create_id_column(Events::Id))
                    .col(ColumnDef::new(Events::ChannelId).integer().not_null())
                    .col(self.create_timestamp_column(Events::StartTime))
                    .col(self.create_timestamp_column(Events::EndTime))
                    .col(ColumnDef::new(Events::Title).text().not_null())
                    .col(ColumnDef::new(Events::ShortDescription).text())
                    .col(ColumnDef::new(Events::ExtendedDescription).text())
                    .col(ColumnDef::new(Events::GenreId).integer().not_null())
                    .col(ColumnDef::new(Events::CategoryId).integer().not_null())
                    .col(self.create_timestamp_column(Events::CreatedAt))
                    .col(self.create_timestamp_column(Events::UpdatedAt))
                    .col(ColumnDef::new(Events::DeletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_channel_id")
                            .from(Events::Table, Events::ChannelId)
                            .to(Channels::Table, Channels::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_category_id")
                            .from(Events::Table, Events::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_genre_id")
                            .from(Events::Table, Events::GenreId)
                            .to(Genres::Table, Genres::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn create_event_ratings_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EventRatings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EventRatings::EventId).integer().not_null())
                    .col(ColumnDef::new(EventRatings::RatingValueId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(EventRatings::EventId)
                            .col(EventRatings::RatingValueId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_ratings_event_id")
                            .from(EventRatings::Table, EventRatings::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_ratings_rating_value_id")
                            .from(EventRatings::Table, EventRatings::RatingValueId)
                            .to(RatingValues::Table, RatingValues::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn create_indexes(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        // Timezones are addressed by (country, name)
        manager
            .create_index(
                Index::create()
                    .name("idx_timezones_country_code_name")
                    .table(Timezones::Table)
                    .col(Timezones::CountryCode)
                    .col(Timezones::TimezoneName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Genre indexes
        manager
            .create_index(
                Index::create()
                    .name("idx_genres_nibble_level_1")
                    .table(Genres::Table)
                    .col(Genres::NibbleLevel1)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_genres_description")
                    .table(Genres::Table)
                    .col(Genres::Description)
                    .to_owned(),
            )
            .await?;

        // Event indexes
        manager
            .create_index(
                Index::create()
                    .name("idx_events_channel_start")
                    .table(Events::Table)
                    .col(Events::ChannelId)
                    .col(Events::StartTime)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_events_title")
                    .table(Events::Table)
                    .col(Events::Title)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_events_deleted_at")
                    .table(Events::Table)
                    .col(Events::DeletedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Countries {
    Table,
    Id,
    Code,
    Name,
    Region,
}

#[derive(DeriveIden)]
enum Timezones {
    Table,
    Id,
    CountryCode,
    TimezoneName,
    StandardOffset,
    DstOffset,
    DstStartDay,
    DstStartMonth,
    DstStartTime,
    DstEndDay,
    DstEndMonth,
    DstEndTime,
    IsDefault,
}

#[derive(DeriveIden)]
enum GenreColors {
    Table,
    Id,
    #[sea_orm(iden = "nibble_level_1")]
    NibbleLevel1,
    ColorHex,
}

#[derive(DeriveIden)]
enum Genres {
    Table,
    Id,
    #[sea_orm(iden = "nibble_level_1")]
    NibbleLevel1,
    #[sea_orm(iden = "nibble_level_2")]
    NibbleLevel2,
    Description,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Description,
}

#[derive(DeriveIden)]
enum RatingValues {
    Table,
    Id,
    RatingSystemId,
    Value,
    MinAge,
    Description,
}

#[derive(DeriveIden)]
enum RatingSystems {
    Table,
    Id,
    CountryId,
    Description,
}

#[derive(DeriveIden)]
enum Networks {
    Table,
    Id,
    CountryId,
    TimezoneId,
    ServiceId,
    Description,
    StartTime,
    FinishTime,
    CridDescription,
}

#[derive(DeriveIden)]
enum Channels {
    Table,
    Id,
    NetworkId,
    Description,
    BroadcastStartTime,
    BroadcastFinishTime,
    ServiceId,
    ServiceVpid,
    ServiceApid,
    AuthorityMeta,
    LogoName,
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    ChannelId,
    StartTime,
    EndTime,
    Title,
    ShortDescription,
    ExtendedDescription,
    GenreId,
    CategoryId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum EventRatings {
    Table,
    EventId,
    RatingValueId,
}
