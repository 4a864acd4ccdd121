#[cfg(test)]
mod tests {
    use crate::*;

    fn scenario_form() -> FormValues {
        FormValues::defaults()
            .with(fields::NAV_ENABLED, "true")
            .with(fields::PAG_ENABLED, "false")
            .with(fields::LOOP, "true")
            .with(fields::SPEED, "500")
            .with(fields::SPV_DESKTOP, "3")
    }

    #[test]
    fn defaults_build() {
        let cfg = build_config(&FormValues::defaults()).unwrap();
        assert!(!cfg.loop_slides);
        assert_eq!(cfg.speed, 300);
        assert_eq!(cfg.autoplay, Switch::Off);
        assert!(cfg.navigation);
        assert_eq!(
            cfg.pagination,
            Switch::On(Pagination {
                kind: PaginationKind::Bullets,
                clickable: true,
            })
        );
        assert_eq!(cfg.effect, Effect::Slide);
        assert_eq!(cfg.slides_per_view, 3);
        assert_eq!(cfg.space_between, 30);
    }

    #[test]
    fn scenario_json_has_loop_then_speed() {
        let cfg = build_config(&scenario_form()).unwrap();
        let json = cfg.to_json().unwrap();
        assert!(json.contains(r#""loop":true,"speed":500"#), "{json}");
        assert!(json.contains(r#""pagination":false"#), "{json}");
        assert!(json.contains(r#""autoplay":false"#), "{json}");
        assert!(json.contains(r#""navigation":true"#), "{json}");
    }

    #[test]
    fn booleans_require_exact_true() {
        for raw in ["TRUE", "True", "1", "yes", " true", ""] {
            let form = FormValues::defaults().with(fields::LOOP, raw);
            assert!(!build_config(&form).unwrap().loop_slides, "{raw:?}");
        }
        let mut form = FormValues::defaults();
        form.remove(fields::GRAB_CURSOR);
        assert!(!build_config(&form).unwrap().grab_cursor);
    }

    #[test]
    fn integers_truncate() {
        let form = FormValues::defaults()
            .with(fields::SPEED, "12.9")
            .with(fields::SPACE_BETWEEN, "  40px")
            .with(fields::INITIAL_SLIDE, "+2");
        let cfg = build_config(&form).unwrap();
        assert_eq!(cfg.speed, 12);
        assert_eq!(cfg.space_between, 40);
        assert_eq!(cfg.initial_slide, 2);
    }

    #[test]
    fn non_numeric_fails_naming_field() {
        let form = FormValues::defaults().with(fields::SPEED, "fast");
        let err = build_config(&form).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidNumber {
                field: fields::SPEED,
                value: Some("fast".into()),
            }
        );
        assert_eq!(err.field(), Some("speed"));
    }

    #[test]
    fn absent_number_fails() {
        let mut form = FormValues::defaults();
        form.remove(fields::SPV_TABLET);
        let err = build_config(&form).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidNumber {
                field: fields::SPV_TABLET,
                value: None,
            }
        );
    }

    #[test]
    fn zero_slides_per_view_is_out_of_range() {
        let form = FormValues::defaults().with(fields::SPV_MOBILE, "0");
        assert!(matches!(
            build_config(&form).unwrap_err(),
            Error::OutOfRange {
                field: fields::SPV_MOBILE,
                value: 0,
                min: 1,
                ..
            }
        ));
    }

    #[test]
    fn huge_number_is_out_of_range() {
        let form = FormValues::defaults().with(fields::SPEED, "99999999999999999999ms");
        assert_eq!(
            build_config(&form).unwrap_err(),
            Error::OutOfRange {
                field: fields::SPEED,
                value: i64::MAX,
                min: 0,
                max: u32::MAX,
            }
        );
    }

    #[test]
    fn negative_gap_is_out_of_range() {
        let form = FormValues::defaults().with(fields::SPACE_BETWEEN, "-4");
        assert!(matches!(
            build_config(&form).unwrap_err(),
            Error::OutOfRange { value: -4, .. }
        ));
    }

    #[test]
    fn autoplay_fields_ignored_when_disabled() {
        let form = FormValues::defaults()
            .with(fields::AUTOPLAY_ENABLED, "false")
            .with(fields::AUTOPLAY_DELAY, "not a number");
        assert_eq!(build_config(&form).unwrap().autoplay, Switch::Off);
    }

    #[test]
    fn autoplay_enabled_is_fully_populated() {
        let form = FormValues::defaults()
            .with(fields::AUTOPLAY_ENABLED, "true")
            .with(fields::AUTOPLAY_DELAY, "2500")
            .with(fields::PAUSE_ON_HOVER, "false");
        assert_eq!(
            build_config(&form).unwrap().autoplay,
            Switch::On(Autoplay {
                delay: 2500,
                disable_on_interaction: false,
                pause_on_hover: false,
            })
        );
    }

    #[test]
    fn unknown_pagination_type_fails() {
        let form = FormValues::defaults().with(fields::PAG_TYPE, "dots");
        let err = build_config(&form).unwrap_err();
        assert!(matches!(err, Error::InvalidChoice { field: "pag-type", .. }));
        assert!(err.to_string().contains("bullets, fraction, progressbar"));
    }

    #[test]
    fn missing_effect_fails() {
        let mut form = FormValues::defaults();
        form.remove(fields::EFFECT);
        assert_eq!(
            build_config(&form).unwrap_err(),
            Error::MissingField {
                field: fields::EFFECT
            }
        );
    }

    #[test]
    fn breakpoints_are_fixed_and_ascending() {
        let form = FormValues::defaults()
            .with(fields::SPV_MOBILE, "1")
            .with(fields::SPV_TABLET, "2")
            .with(fields::SPV_DESKTOP, "4")
            .with(fields::SPACE_BETWEEN, "16");
        let cfg = build_config(&form).unwrap();
        let got: Vec<_> = cfg
            .breakpoints
            .iter()
            .map(|(w, b)| (*w, b.slides_per_view, b.space_between))
            .collect();
        assert_eq!(got, vec![(480, 1, 10), (768, 2, 20), (1200, 4, 16)]);
    }

    #[test]
    fn json_round_trips() {
        let cfg = build_config(&scenario_form()).unwrap();
        let back = Configuration::from_json(&cfg.to_json().unwrap()).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Configuration::from_json("{\"loop\": tru"),
            Err(Error::Json { .. })
        ));
        assert!(matches!(
            Configuration::from_json("{\"loop\": true}"),
            Err(Error::Json { .. })
        ));
    }

    #[test]
    fn parse_int_prefix_cases() {
        assert_eq!(parse_int_prefix("42"), Some(42));
        assert_eq!(parse_int_prefix("-7abc"), Some(-7));
        assert_eq!(parse_int_prefix("\t 9"), Some(9));
        assert_eq!(parse_int_prefix("3e5"), Some(3));
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix(".5"), None);
        assert_eq!(parse_int_prefix("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_int_prefix("-99999999999999999999"), Some(-i64::MAX));
    }
}
