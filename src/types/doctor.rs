use rust_decimal::Decimal;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use entity::doctor::{ActiveModel as DoctorActive, Model as DoctorModel};

use crate::types::error::AppError;
use crate::types::validation::{self, FieldReader};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DoctorRes {
    pub id: Uuid,
    pub name: String,
    pub specialization: String,
    pub bio: String,
    pub contact_info: String,
    pub profile_picture: Option<String>,
    pub clinic_address: String,
    pub rating: Decimal,
    pub price_per_appointment: Decimal,
}

impl From<DoctorModel> for DoctorRes {
    fn from(m: DoctorModel) -> Self {
        Self {
            id: m.id,
            name: m.name,
            specialization: m.specialization,
            bio: m.bio,
            contact_info: m.contact_info,
            profile_picture: m.profile_picture,
            clinic_address: m.clinic_address,
            rating: m.rating,
            price_per_appointment: m.price_per_appointment,
        }
    }
}

#[derive(Debug, Default)]
pub struct RDoctor {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub bio: Option<String>,
    pub contact_info: Option<String>,
    pub profile_picture: Option<Option<String>>,
    pub clinic_address: Option<String>,
    pub rating: Option<Decimal>,
    pub price_per_appointment: Option<Decimal>,
}

impl RDoctor {
    pub fn read(body: Map<String, Value>, partial: bool) -> Result<Self, AppError> {
        let mut r = FieldReader::new(body, partial);

        let name = r.required::<String>("name");
        let name = r.check("name", name, |v| validation::text(v, Some(255)));
        let specialization = r.required::<String>("specialization");
        let specialization = r.check("specialization", specialization, |v| validation::text(v, Some(100)));
        let bio = r.required::<String>("bio");
        let bio = r.check("bio", bio, |v| validation::text(v, None));
        let contact_info = r.required::<String>("contact_info");
        let contact_info = r.check("contact_info", contact_info, |v| validation::text(v, None));
        let profile_picture = r.nullable::<String>("profile_picture");
        let profile_picture = r.check("profile_picture", profile_picture, |v| validation::nullable_text(v, Some(100)));
        let clinic_address = r.required::<String>("clinic_address");
        let clinic_address = r.check("clinic_address", clinic_address, |v| validation::text(v, None));
        // rating has a column default, price does not
        let rating = r.optional::<Decimal>("rating");
        let rating = r.check("rating", rating, |v| validation::decimal(v, 3, 2));
        let price_per_appointment = r.required::<Decimal>("price_per_appointment");
        let price_per_appointment = r.check("price_per_appointment", price_per_appointment, |v| {
            validation::decimal(v, 6, 2)?;
            validation::non_negative(v)
        });

        r.finish(Self {
            name,
            specialization,
            bio,
            contact_info,
            profile_picture,
            clinic_address,
            rating,
            price_per_appointment,
        })
    }

    pub fn apply(self, am: &mut DoctorActive) {
        if let Some(v) = self.name { am.name = Set(v); }
        if let Some(v) = self.specialization { am.specialization = Set(v); }
        if let Some(v) = self.bio { am.bio = Set(v); }
        if let Some(v) = self.contact_info { am.contact_info = Set(v); }
        if let Some(v) = self.profile_picture { am.profile_picture = Set(v); }
        if let Some(v) = self.clinic_address { am.clinic_address = Set(v); }
        if let Some(v) = self.rating { am.rating = Set(v.round_dp(2)); }
        if let Some(v) = self.price_per_appointment { am.price_per_appointment = Set(v.round_dp(2)); }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn patch_reads_only_present_fields() {
        let body = json!({"rating": "4.50"});
        let doctor = RDoctor::read(body.as_object().cloned().unwrap(), true).unwrap();
        assert_eq!(doctor.rating, Some(Decimal::new(450, 2)));
        assert!(doctor.name.is_none());
        assert!(doctor.price_per_appointment.is_none());
    }

    #[test]
    fn create_needs_price_and_rejects_extra_places() {
        let body = json!({
            "name": "Dr. Ada",
            "specialization": "GP",
            "bio": "",
            "contact_info": "ada@clinic.test",
            "clinic_address": "1 High St",
            "rating": 4.567
        });
        let Err(AppError::Validation(errors)) = RDoctor::read(body.as_object().cloned().unwrap(), false) else {
            panic!("expected validation error")
        };
        assert!(errors.get("price_per_appointment").is_some());
        assert!(errors.get("rating").is_some());
        assert!(errors.get("bio").is_some());
        assert!(errors.get("name").is_none());
    }

    #[test]
    fn only_price_must_be_non_negative() {
        let body = json!({"rating": "-1.25", "price_per_appointment": "-5.00"});
        let Err(AppError::Validation(errors)) = RDoctor::read(body.as_object().cloned().unwrap(), true) else {
            panic!("expected validation error")
        };
        assert!(errors.get("rating").is_none());
        assert_eq!(
            errors.get("price_per_appointment"),
            Some(&["Ensure this value is greater than or equal to 0.".to_string()][..])
        );
    }
}
