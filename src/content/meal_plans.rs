//! Meal plan suggestions by disease and risk category

use crate::models::{Disease, RiskCategory};

/// Meal suggestions for a disease/category pair; empty when none are configured
pub fn meal_plan(disease: Disease, category: RiskCategory) -> &'static [&'static str] {
    match (disease, category) {
        (Disease::Diabetes, RiskCategory::High) => &[
            "Breakfast: Oatmeal with berries, unsweetened",
            "Lunch: Grilled chicken salad, whole grain bread",
            "Dinner: Baked fish, steamed vegetables, quinoa",
            "Snacks: Nuts, Greek yogurt (unsweetened)",
        ],
        (Disease::Diabetes, RiskCategory::Moderate) => &[
            "Breakfast: Whole grain toast with avocado",
            "Lunch: Vegetable soup, brown rice",
            "Dinner: Lean protein with mixed vegetables",
        ],
        (Disease::Diabetes, RiskCategory::Low) => &[
            "Maintain balanced meals with complex carbs",
            "Include fiber-rich foods and lean proteins",
        ],

        (Disease::Heart, RiskCategory::High) => &[
            "Breakfast: Oatmeal with walnuts",
            "Lunch: Salmon, leafy greens, olive oil",
            "Dinner: Grilled chicken, steamed broccoli",
            "Avoid: Saturated fats, excess sodium",
        ],
        (Disease::Heart, RiskCategory::Moderate) => &[
            "Mediterranean diet with fish 2x/week",
            "Limit red meat, increase vegetables",
        ],
        (Disease::Heart, RiskCategory::Low) => &[
            "Continue heart-healthy diet",
            "Omega-3 rich foods, whole grains",
        ],

        (Disease::Liver, RiskCategory::Disease) => &[
            "Breakfast: Fresh fruits, whole grains",
            "Lunch: Lean protein, green vegetables",
            "Dinner: Steamed fish, brown rice",
            "Avoid: Alcohol, fried foods, processed foods",
        ],
        (Disease::Liver, RiskCategory::Normal) => &[
            "Balanced diet with antioxidant-rich foods",
            "Limit alcohol and processed foods",
        ],

        (Disease::Kidney, RiskCategory::High) => &[
            "Low-sodium, low-protein diet",
            "Limit potassium and phosphorus",
            "Consult dietitian for renal diet plan",
        ],
        (Disease::Kidney, RiskCategory::Moderate) => &[
            "Moderate protein intake",
            "Stay hydrated, limit sodium",
        ],
        (Disease::Kidney, RiskCategory::Low) => &[
            "Balanced diet with adequate hydration",
            "Monitor protein intake",
        ],

        (Disease::Bone, RiskCategory::Fracture) => &[
            "High calcium: Milk, yogurt, cheese",
            "Vitamin D: Fortified foods, sunlight",
            "Protein: Lean meats, legumes",
        ],
        (Disease::Bone, RiskCategory::Normal) => &[
            "Calcium-rich foods daily",
            "Vitamin D supplementation if needed",
        ],

        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectable_categories_have_plans() {
        for disease in Disease::ALL {
            let (negative, positive) = disease.selectable_categories();
            assert!(!meal_plan(disease, negative).is_empty());
            assert!(!meal_plan(disease, positive).is_empty());
        }
    }

    #[test]
    fn test_mismatched_category_is_empty() {
        assert!(meal_plan(Disease::Liver, RiskCategory::High).is_empty());
        assert!(meal_plan(Disease::Bone, RiskCategory::Low).is_empty());
    }

    #[test]
    fn test_plan_order_is_preserved() {
        let plan = meal_plan(Disease::Heart, RiskCategory::High);
        assert!(plan[0].starts_with("Breakfast"));
        assert!(plan[3].starts_with("Avoid"));
    }
}
