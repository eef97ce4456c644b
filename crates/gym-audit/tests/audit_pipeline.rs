use gym_audit::workflows::audit::samples::{performant_gym, struggling_gym};
use gym_audit::workflows::audit::{
    calculate_kpis, calculate_scores, generate_recommendations, Answer, KpiCode, PillarCode,
    Priority,
};

fn close(actual: f64, expected: f64, tolerance: f64) -> bool {
    (actual - expected).abs() <= tolerance
}

#[test]
fn performant_gym_matches_reference_figures() {
    let answers = performant_gym();
    let kpis = calculate_kpis(&answers);

    assert!(close(kpis.get(KpiCode::Arpm), 99.33, 0.01));
    assert!(close(kpis.get(KpiCode::CaTotal12m), 178_800.0, 1_000.0));
    assert!(close(kpis.get(KpiCode::LoyerRatio), 13.4, 0.1));
    assert!(kpis.get(KpiCode::EbitdaEstime) > 75_000.0);
    assert!(kpis.get(KpiCode::MargeEbitda) > 20.0);
    assert!(close(kpis.get(KpiCode::OccupationMoyenne), 75.0, 1e-9));
    assert!(close(kpis.get(KpiCode::ConversionEssai), 48.0, 1e-9));
    assert!(close(kpis.get(KpiCode::ChurnMensuel), 2.67, 0.01));

    let summary = calculate_scores(&kpis);
    assert_eq!(summary.pillar_score(PillarCode::Finance), 97);
    assert_eq!(summary.pillar_score(PillarCode::Clientele), 86);
    assert_eq!(summary.pillar_score(PillarCode::Exploitation), 84);
    assert_eq!(summary.global_score, 89);

    let recommendations = generate_recommendations(&kpis, &answers);
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0].rec_code, "maintain_performance");
}

#[test]
fn struggling_gym_raises_critical_recommendations() {
    let answers = struggling_gym();
    let kpis = calculate_kpis(&answers);

    assert!(kpis.get(KpiCode::LoyerRatio) > 25.0);
    assert!(kpis.get(KpiCode::ChurnMensuel) > 7.0);
    assert!(kpis.get(KpiCode::MargeEbitda) < 0.0);
    assert!(kpis.get(KpiCode::OccupationMoyenne) < 50.0);
    assert!(kpis.get(KpiCode::ConversionEssai) < 30.0);

    let summary = calculate_scores(&kpis);
    assert!(summary.global_score < 55);
    for pillar in &summary.scores {
        assert!(pillar.score <= 100);
    }

    let recommendations = generate_recommendations(&kpis, &answers);
    let codes: Vec<&str> = recommendations
        .iter()
        .map(|rec| rec.rec_code.as_str())
        .collect();
    assert_eq!(
        codes,
        vec![
            "reduce_churn",
            "optimize_rent",
            "improve_margins",
            "improve_conversion",
            "improve_occupation"
        ]
    );

    let critical = recommendations
        .iter()
        .filter(|rec| rec.priority == Priority::P1)
        .count();
    assert!(critical >= 3);
    assert!(recommendations
        .iter()
        .all(|rec| rec.expected_impact_eur.is_finite()));
    assert!(close(recommendations[0].expected_impact_eur, 183_600.0, 1e-6));
}

#[test]
fn empty_answer_set_is_fully_computable() {
    let kpis = calculate_kpis(&[]);
    for code in KpiCode::ordered() {
        assert_eq!(kpis.get(code), 0.0, "{code} should default to zero");
    }

    let summary = calculate_scores(&kpis);
    assert_eq!(summary.scores.len(), 3);
    assert!(summary.global_score <= 100);

    let recommendations = generate_recommendations(&kpis, &[]);
    assert!(!recommendations.is_empty() && recommendations.len() <= 6);
    assert!(recommendations
        .iter()
        .all(|rec| rec.rec_code != "increase_arpm" && rec.rec_code != "improve_conversion"));
}

#[test]
fn zero_members_never_produce_nan() {
    let answers = vec![
        Answer::new("produits_exploitation", "ca_abonnements_mensuels", 5000.0),
        Answer::new("structure_base", "nb_membres_actifs_total", 0.0),
        Answer::new("retention_churn", "nb_resiliations_mois", 3.0),
    ];
    let kpis = calculate_kpis(&answers);

    assert_eq!(kpis.get(KpiCode::Arpm), 0.0);
    assert_eq!(kpis.get(KpiCode::ChurnMensuel), 0.0);
    for (code, value) in kpis.iter() {
        assert!(value.is_finite(), "{code} is not finite");
    }
}

#[test]
fn charges_above_revenue_keep_scores_non_negative() {
    let answers = vec![
        Answer::new("produits_exploitation", "ca_abonnements_mensuels", 3000.0),
        Answer::new("charges_exploitation", "loyer_mensuel_ht", 4000.0),
        Answer::new("charges_exploitation", "salaires_bruts_coachs", 60000.0),
        Answer::new("structure_base", "nb_membres_actifs_total", 40.0),
    ];
    let kpis = calculate_kpis(&answers);
    assert!(kpis.get(KpiCode::MargeEbitda) < 0.0);

    let summary = calculate_scores(&kpis);
    let finance = summary
        .pillar(PillarCode::Finance)
        .expect("finance pillar present");
    assert!(finance.details["score_rentabilite"] <= 25.0);
    assert!(summary.global_score <= 100);
}

#[test]
fn recommendation_count_stays_between_one_and_six() {
    let scenarios = vec![performant_gym(), struggling_gym(), Vec::new()];
    for answers in scenarios {
        let kpis = calculate_kpis(&answers);
        let recommendations = generate_recommendations(&kpis, &answers);
        let fallback = recommendations
            .iter()
            .any(|rec| rec.rec_code == "maintain_performance");

        assert!((1..=6).contains(&recommendations.len()));
        assert_eq!(
            fallback,
            recommendations.len() == 1 && recommendations[0].priority == Priority::P3
        );
    }
}
