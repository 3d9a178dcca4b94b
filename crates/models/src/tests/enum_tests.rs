use crate::{activity, formation, job_application, job_offer, media_asset, service, site_config};

#[test]
fn service_category_round_trips() {
    for c in service::Category::ALL {
        assert_eq!(service::Category::parse(c.as_str()), Some(c));
    }
    assert!(service::Category::parse("catering").is_none());
    assert!(service::validate_category("development").is_ok());
    assert!(service::validate_category("").is_err());
}

#[test]
fn formation_category_and_level_round_trip() {
    for c in formation::Category::ALL {
        assert_eq!(formation::Category::parse(c.as_str()), Some(c));
    }
    for l in formation::Level::ALL {
        assert_eq!(formation::Level::parse(l.as_str()), Some(l));
    }
    assert!(formation::validate_level("expert").is_err());
}

#[test]
fn application_status_is_unguarded_but_closed() {
    // Every status parses back; no transition rules are encoded on the type.
    for s in job_application::Status::ALL {
        assert_eq!(job_application::Status::parse(s.as_str()), Some(s));
    }
    assert!(job_application::validate_status("pending").is_err());
}

#[test]
fn contract_types_match_closed_set() {
    assert_eq!(job_offer::ContractType::ALL.len(), 6);
    assert!(job_offer::validate_contract_type("permanent").is_ok());
    assert!(job_offer::validate_contract_type("volunteer").is_err());
}

#[test]
fn media_kind_parses() {
    assert_eq!(media_asset::Kind::parse("carousel"), Some(media_asset::Kind::Carousel));
    assert!(media_asset::validate_kind("banner").is_err());
}

#[test]
fn activity_actions_parse() {
    for a in activity::Action::ALL {
        assert_eq!(activity::Action::parse(a.as_str()), Some(a));
    }
    assert!(activity::validate_action("login").is_err());
}

#[test]
fn site_config_image_fields_parse() {
    assert_eq!(site_config::ImageField::parse("hero_image"), Some(site_config::ImageField::Hero));
    assert_eq!(site_config::ImageField::parse("logo"), Some(site_config::ImageField::Logo));
    assert!(site_config::ImageField::parse("banner").is_none());
}

#[test]
fn job_offer_expiry_computed_from_deadline() {
    use chrono::{Duration, Utc};
    let base = crate::job_offer::Model {
        id: uuid::Uuid::new_v4(),
        title: "Backend Engineer".into(),
        description: "d".into(),
        missions: "m".into(),
        profile: "p".into(),
        benefits: String::new(),
        contract_type: "permanent".into(),
        location: "Paris".into(),
        salary_min: None,
        salary_max: None,
        min_experience: None,
        start_date: None,
        deadline: None,
        urgent: false,
        position: 0,
        active: true,
        created_at: Utc::now().into(),
        updated_at: Utc::now().into(),
    };
    assert!(!base.is_expired());

    let expired = crate::job_offer::Model {
        deadline: Some((Utc::now() - Duration::days(1)).date_naive()),
        ..base.clone()
    };
    assert!(expired.is_expired());

    let open = crate::job_offer::Model {
        deadline: Some((Utc::now() + Duration::days(7)).date_naive()),
        ..base
    };
    assert!(!open.is_expired());
}
