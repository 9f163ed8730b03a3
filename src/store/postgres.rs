use async_trait::async_trait;
use sqlx::PgPool;

use super::{RecipientStore, StoreError};
use crate::domain::{
    DEFAULT_COUNTRY_ISO3, NewRecipient, Recipient, RecipientDetails, RecipientId, UserId,
};

const RECIPIENT_COLUMNS: &str = r#"
    recipient_id, user_id,
    first_names, last_names, email_address, telephone_number,
    street_1, street_2, city, region, postal_code, country_iso3,
    bank_account_number, bank_routing_number, bank_name, swift_bic,
    bank_street_1, bank_street_2, bank_city, bank_region, bank_country_iso3,
    created_at, updated_at
"#;

#[derive(Clone)]
pub struct PgRecipientStore {
    pool: PgPool,
}

impl PgRecipientStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipientStore for PgRecipientStore {
    #[tracing::instrument(name = "Loading recipients from the database", skip(self))]
    async fn list(&self, user_id: UserId) -> Result<Vec<Recipient>, StoreError> {
        let query = format!(
            "SELECT {RECIPIENT_COLUMNS} FROM recipients WHERE user_id = $1 ORDER BY recipient_id"
        );
        let recipients = sqlx::query_as::<_, Recipient>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(recipients)
    }

    #[tracing::instrument(
        name = "Saving new recipient details in the database",
        skip(self, new_recipient),
        fields(user_id = %new_recipient.user_id)
    )]
    async fn insert(&self, new_recipient: NewRecipient) -> Result<Recipient, StoreError> {
        let query = format!(
            r#"
    INSERT INTO recipients (
        user_id,
        first_names, last_names, email_address, telephone_number,
        street_1, street_2, city, region, postal_code, country_iso3,
        bank_account_number, bank_routing_number, bank_name, swift_bic,
        bank_street_1, bank_street_2, bank_city, bank_region, bank_country_iso3
    )
    VALUES (
        $1,
        $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
        $12, $13, $14, $15, $16, $17, $18, $19, $20
    )
    RETURNING {RECIPIENT_COLUMNS}
            "#
        );
        let details = &new_recipient.details;
        let recipient = sqlx::query_as::<_, Recipient>(&query)
            .bind(new_recipient.user_id)
            .bind(&details.first_names)
            .bind(&details.last_names)
            .bind(&details.email_address)
            .bind(&details.telephone_number)
            .bind(&details.street_1)
            .bind(&details.street_2)
            .bind(&details.city)
            .bind(&details.region)
            .bind(&details.postal_code)
            .bind(
                details
                    .country_iso3
                    .as_deref()
                    .unwrap_or(DEFAULT_COUNTRY_ISO3),
            )
            .bind(&details.bank_account_number)
            .bind(&details.bank_routing_number)
            .bind(&details.bank_name)
            .bind(&details.swift_bic)
            .bind(&details.bank_street_1)
            .bind(&details.bank_street_2)
            .bind(&details.bank_city)
            .bind(&details.bank_region)
            .bind(&details.bank_country_iso3)
            .fetch_one(&self.pool)
            .await?;
        Ok(recipient)
    }

    #[tracing::instrument(name = "Updating recipient details in the database", skip(self, changes))]
    async fn update(
        &self,
        user_id: UserId,
        recipient_id: RecipientId,
        changes: RecipientDetails,
    ) -> Result<Recipient, StoreError> {
        let query = format!(
            r#"
    UPDATE recipients SET
        first_names = COALESCE($3, first_names),
        last_names = COALESCE($4, last_names),
        email_address = COALESCE($5, email_address),
        telephone_number = COALESCE($6, telephone_number),
        street_1 = COALESCE($7, street_1),
        street_2 = COALESCE($8, street_2),
        city = COALESCE($9, city),
        region = COALESCE($10, region),
        postal_code = COALESCE($11, postal_code),
        country_iso3 = COALESCE($12, country_iso3),
        bank_account_number = COALESCE($13, bank_account_number),
        bank_routing_number = COALESCE($14, bank_routing_number),
        bank_name = COALESCE($15, bank_name),
        swift_bic = COALESCE($16, swift_bic),
        bank_street_1 = COALESCE($17, bank_street_1),
        bank_street_2 = COALESCE($18, bank_street_2),
        bank_city = COALESCE($19, bank_city),
        bank_region = COALESCE($20, bank_region),
        bank_country_iso3 = COALESCE($21, bank_country_iso3),
        updated_at = now()
    WHERE recipient_id = $1 AND user_id = $2
    RETURNING {RECIPIENT_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Recipient>(&query)
            .bind(recipient_id)
            .bind(user_id)
            .bind(changes.first_names)
            .bind(changes.last_names)
            .bind(changes.email_address)
            .bind(changes.telephone_number)
            .bind(changes.street_1)
            .bind(changes.street_2)
            .bind(changes.city)
            .bind(changes.region)
            .bind(changes.postal_code)
            .bind(changes.country_iso3)
            .bind(changes.bank_account_number)
            .bind(changes.bank_routing_number)
            .bind(changes.bank_name)
            .bind(changes.swift_bic)
            .bind(changes.bank_street_1)
            .bind(changes.bank_street_2)
            .bind(changes.bank_city)
            .bind(changes.bank_region)
            .bind(changes.bank_country_iso3)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(recipient_id))
    }

    #[tracing::instrument(name = "Deleting recipient from the database", skip(self))]
    async fn delete(&self, recipient_id: RecipientId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM recipients WHERE recipient_id = $1")
            .bind(recipient_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(recipient_id));
        }
        Ok(())
    }
}
