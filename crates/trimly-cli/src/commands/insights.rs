//! Insight command implementations

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use trimly_core::insights::{BehaviorAnalysis, EnergyInsights, SatietyInsights};
use trimly_core::models::{RiskLevel, Severity};
use trimly_core::{
    BehaviorPatternAnalyzer, Config, CravingPredictor, Journal, MotivationInsightGenerator,
    SatietyEnergyAnalyzer, StreakTracker, ThirstHungerClassifier,
};

use super::truncate;

pub fn cmd_streak(journal: &Journal, config: &Config, today: NaiveDate) -> Result<()> {
    let tracker = StreakTracker::new(journal).with_weekly_goal(config.tracking.weekly_goal_days);
    let streak = tracker.current_streak_on(today);
    let progress = tracker.weekly_progress_on(today);
    let badges = tracker.recent_achievements_on(today);

    println!();
    println!("🔥 Current streak: {} day{}", streak, if streak == 1 { "" } else { "s" });
    println!("   ─────────────────────────────");
    println!(
        "   This week (since {}): {}/{} days{}",
        progress.week_start,
        progress.this_week_days,
        progress.goal_days,
        if progress.goal_met() { " ✅" } else { "" }
    );
    println!("   Last week: {} days", progress.last_week_days);

    if !badges.is_empty() {
        println!();
        println!("   Achievements:");
        for badge in &badges {
            println!("   {}", badge);
        }
    }
    println!();
    Ok(())
}

fn print_satiety(insights: &SatietyInsights) {
    println!();
    println!("🥗 Satiety Rankings");
    println!("   ─────────────────────────────");
    if !insights.top_foods.is_empty() {
        println!("   Most filling:");
        for food in &insights.top_foods {
            println!(
                "     {:<24} {:>4.1}/10  {:>4.1} h  ({} ratings)",
                truncate(&food.food_name, 24),
                food.average_rating,
                food.average_hours_until_hungry,
                food.samples
            );
        }
        println!("   Least filling:");
        for food in &insights.bottom_foods {
            println!(
                "     {:<24} {:>4.1}/10  {:>4.1} h",
                truncate(&food.food_name, 24),
                food.average_rating,
                food.average_hours_until_hungry
            );
        }
        println!();
    }
    println!("   💡 {}", insights.recommendation);
    println!();
}

pub fn cmd_satiety(journal: &Journal) -> Result<()> {
    print_satiety(&SatietyEnergyAnalyzer::new(journal).satiety_insights());
    Ok(())
}

fn print_energy(insights: &EnergyInsights) {
    println!();
    println!("⚡ Energy Rankings");
    println!("   ─────────────────────────────");
    if !insights.top_foods.is_empty() {
        println!("   Best energy:");
        for food in &insights.top_foods {
            println!(
                "     {:<24} {:>4.1}/10  {:>4.1} h  crash {:>3.0}%",
                truncate(&food.food_name, 24),
                food.average_rating,
                food.average_hours_sustained,
                food.crash_rate
            );
        }
        println!("   Worst energy:");
        for food in &insights.bottom_foods {
            println!(
                "     {:<24} {:>4.1}/10  {:>4.1} h  crash {:>3.0}%",
                truncate(&food.food_name, 24),
                food.average_rating,
                food.average_hours_sustained,
                food.crash_rate
            );
        }
        if !insights.low_energy.is_empty() {
            let names: Vec<&str> = insights
                .low_energy
                .iter()
                .map(|f| f.food_name.as_str())
                .collect();
            println!("   ⚠️  Energy drainers: {}", names.join(", "));
        }
        println!();
    }
    println!("   💡 {}", insights.recommendation);
    println!();
}

pub fn cmd_energy(journal: &Journal) -> Result<()> {
    print_energy(&SatietyEnergyAnalyzer::new(journal).energy_insights());
    Ok(())
}

pub fn cmd_thirst(journal: &Journal, now: NaiveDateTime) -> Result<()> {
    let assessment = ThirstHungerClassifier::new(journal).assess_at(now);

    println!();
    if assessment.is_likely_thirst {
        println!("💧 Probably thirst");
    } else {
        println!("🍎 Probably real hunger");
    }
    println!("   ─────────────────────────────");
    println!("   Water today: {} cups", assessment.cups_today);
    println!(
        "   Since last water: {:.1} h",
        assessment.hours_since_last_water
    );
    println!(
        "   Since last meal: {:.1} h",
        assessment.hours_since_last_meal
    );
    if assessment.estimated_calories_saved > 0 {
        println!(
            "   Could save about {} calories",
            assessment.estimated_calories_saved
        );
    }
    println!();
    println!("   💡 {}", assessment.recommendation);
    println!();
    Ok(())
}

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "🔴",
        Severity::Medium => "🟡",
        Severity::Low => "🟢",
    }
}

fn print_analysis(analysis: &BehaviorAnalysis) {
    println!();
    println!("🧠 Behavior Patterns");
    println!("   ─────────────────────────────");
    println!(
        "   Trend: {}   Confidence: {}%",
        analysis.progress_trend, analysis.confidence_level
    );

    if !analysis.patterns.is_empty() {
        println!();
        for pattern in &analysis.patterns {
            println!(
                "   {} {} ({})",
                severity_icon(pattern.severity),
                pattern.description,
                pattern.severity
            );
            println!("      {}", pattern.impact);
        }
    }

    println!();
    for insight in &analysis.personalized_insights {
        println!("   💡 {}", insight);
    }

    if !analysis.action_priority.is_empty() {
        println!();
        println!("   Next steps:");
        for (i, action) in analysis.action_priority.iter().enumerate() {
            println!("   {}. {}", i + 1, action);
        }
    }
    println!();
}

pub fn cmd_patterns(journal: &Journal, today: NaiveDate) -> Result<()> {
    print_analysis(&BehaviorPatternAnalyzer::new(journal).analyze_on(today));
    Ok(())
}

pub fn cmd_motivation(journal: &Journal) -> Result<()> {
    let insights = MotivationInsightGenerator::new(journal).insights();

    println!();
    for insight in &insights {
        println!("✨ {}", insight.title);
        println!("   {}", insight.message);
        println!();
    }
    Ok(())
}

pub async fn cmd_predict(
    journal: &Journal,
    config: &Config,
    now: NaiveDateTime,
    json: bool,
) -> Result<()> {
    let predictor = CravingPredictor::from_config(journal, config);
    if !predictor.has_backend() && !json {
        println!("   💡 Tip: Set OLLAMA_HOST (or configure [ai] host) for AI craving predictions");
    }

    let prediction = predictor.predict_at(now).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
        return Ok(());
    }

    let icon = match prediction.risk_level {
        RiskLevel::High => "🔴",
        RiskLevel::Medium => "🟡",
        RiskLevel::Low => "🟢",
    };

    println!();
    println!("{} Craving risk: {}", icon, prediction.risk_level);
    println!("   ─────────────────────────────");
    println!(
        "   Expected in: {:.1} h   Confidence: {}%",
        prediction.time_until_craving, prediction.confidence
    );
    println!("   Why: {}", prediction.reason);
    println!();
    println!("   Prevention:");
    for tip in &prediction.prevention {
        println!("   • {}", tip);
    }
    if prediction.is_fallback() {
        println!();
        println!("   ⚠️  AI prediction unavailable, showing general guidance");
    }
    println!();
    Ok(())
}
