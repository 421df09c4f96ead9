//! Static reference tables.
//!
//! Ranges are adult reference intervals; texts list conditions commonly
//! associated with each out-of-range state.

use crate::types::{Abnormality, RangeBounds, ReferenceRanges, StateText, TestDefinition};

/// Bounds that keep their literal spelling for display, so `range!(4.0, 11.0)`
/// prints `4.0-11.0` and `range!(0, 20)` prints `0-20`.
macro_rules! range {
    ($min:literal, $max:literal) => {
        RangeBounds::written(
            $min as f64,
            $max as f64,
            concat!(stringify!($min), "-", stringify!($max)),
        )
    };
}

/// Every analyte the range evaluator knows, in display order.
pub static BLOOD_TESTS: &[TestDefinition] = &[
    TestDefinition {
        code: "Hemoglobin",
        name: "Hemoglobin",
        units: "g/dL",
        ranges: ReferenceRanges::ByGender {
            male: range!(13.5, 17.5),
            female: range!(12.0, 15.5),
        },
        low: StateText {
            condition: "Anemia, Blood loss, Chronic disease, Nutritional deficiency, Bone marrow disorder, Kidney disease",
            symptoms: "Fatigue, Weakness, Pale skin, Shortness of breath, Dizziness",
        },
        high: StateText {
            condition: "Dehydration, Polycythemia vera, Lung disease, High altitude adaptation",
            symptoms: "Headache, Dizziness, Flushed skin, Blurred vision, Itching",
        },
    },
    TestDefinition {
        code: "RBC",
        name: "Red Blood Cells",
        units: "million cells/μL",
        ranges: ReferenceRanges::ByGender {
            male: range!(4.5, 5.9),
            female: range!(4.0, 5.2),
        },
        low: StateText {
            condition: "Anemia, Bone marrow failure, Nutritional deficiency, Chronic inflammation, Hemolysis",
            symptoms: "Fatigue, Pale skin, Rapid heartbeat, Cold hands/feet",
        },
        high: StateText {
            condition: "Dehydration, Polycythemia vera, Hypoxia, Kidney tumor",
            symptoms: "Fatigue, Headache, Blurred vision, Itching (especially after shower)",
        },
    },
    TestDefinition {
        code: "HCT",
        name: "Hematocrit",
        units: "%",
        ranges: ReferenceRanges::ByGender {
            male: range!(40, 50),
            female: range!(36, 46),
        },
        low: StateText {
            condition: "Anemia, Bleeding, Nutritional deficiency, Bone marrow disorder",
            symptoms: "Fatigue, Weakness, Pale skin, Shortness of breath",
        },
        high: StateText {
            condition: "Dehydration, Polycythemia vera, Chronic lung disease",
            symptoms: "Headache, Dizziness, Flushed skin, Vision problems",
        },
    },
    TestDefinition {
        code: "MCV",
        name: "Mean Corpuscular Volume",
        units: "fL",
        ranges: ReferenceRanges::Default(range!(80, 100)),
        low: StateText {
            condition: "Iron deficiency anemia, Thalassemia, Chronic disease",
            symptoms: "Fatigue, Pale skin, Brittle nails, Pica (craving ice/dirt)",
        },
        high: StateText {
            condition: "Vitamin B12 deficiency, Folate deficiency, Liver disease, Hypothyroidism",
            symptoms: "Fatigue, Diarrhea, Numbness/tingling, Balance problems",
        },
    },
    TestDefinition {
        code: "MCH",
        name: "Mean Corpuscular Hemoglobin",
        units: "pg",
        ranges: ReferenceRanges::Default(range!(27, 33)),
        low: StateText {
            condition: "Iron deficiency anemia, Thalassemia",
            symptoms: "Fatigue, Pale skin, Weakness, Shortness of breath",
        },
        high: StateText {
            condition: "Macrocytic anemia, Reticulocytosis",
            symptoms: "Fatigue, Pale skin, Diarrhea, Numbness in extremities",
        },
    },
    TestDefinition {
        code: "MCHC",
        name: "Mean Corpuscular Hemoglobin Concentration",
        units: "g/dL",
        ranges: ReferenceRanges::Default(range!(32, 36)),
        low: StateText {
            condition: "Iron deficiency anemia, Thalassemia",
            symptoms: "Fatigue, Pale skin, Brittle nails, Cold intolerance",
        },
        high: StateText {
            condition: "Hereditary spherocytosis, Hemoglobin C disease",
            symptoms: "Fatigue, Jaundice, Enlarged spleen, Gallstones",
        },
    },
    TestDefinition {
        code: "RDW-CV",
        name: "Red Cell Distribution Width (CV)",
        units: "%",
        ranges: ReferenceRanges::Default(range!(11.5, 14.5)),
        low: StateText {
            condition: "Not clinically significant",
            symptoms: "None typically",
        },
        high: StateText {
            condition: "Iron deficiency anemia, Vitamin B12 deficiency, Hemoglobinopathy, Myelodysplasia",
            symptoms: "Varies by underlying condition (fatigue, weakness, pallor)",
        },
    },
    TestDefinition {
        code: "RDW-SD",
        name: "Red Cell Distribution Width (SD)",
        units: "fL",
        ranges: ReferenceRanges::Default(range!(39, 46)),
        low: StateText {
            condition: "Not clinically significant",
            symptoms: "None typically",
        },
        high: StateText {
            condition: "Iron deficiency anemia, Vitamin B12 deficiency, Hemoglobinopathy, Myelodysplasia",
            symptoms: "Varies by underlying condition (fatigue, weakness, pallor)",
        },
    },
    TestDefinition {
        code: "WBC",
        name: "White Blood Cells",
        units: "×10³/μL",
        ranges: ReferenceRanges::Default(range!(4.0, 11.0)),
        low: StateText {
            condition: "Viral infection, Bone marrow disorder, Autoimmune disease, Severe infection",
            symptoms: "Frequent infections, Fever, Fatigue, Mouth sores",
        },
        high: StateText {
            condition: "Bacterial infection, Leukemia, Inflammation, Stress response",
            symptoms: "Fever, Pain, Fatigue, Night sweats (if leukemia)",
        },
    },
    TestDefinition {
        code: "NEU%",
        name: "Neutrophils",
        units: "%",
        ranges: ReferenceRanges::Default(range!(40, 70)),
        low: StateText {
            condition: "Viral infection, Autoimmune disorder, Chemotherapy effect",
            symptoms: "Frequent infections, Fever, Mouth ulcers",
        },
        high: StateText {
            condition: "Bacterial infection, Acute inflammation, Steroid use",
            symptoms: "Fever, Pain, Redness/swelling at infection site",
        },
    },
    TestDefinition {
        code: "LYM%",
        name: "Lymphocytes",
        units: "%",
        ranges: ReferenceRanges::Default(range!(20, 40)),
        low: StateText {
            condition: "HIV/AIDS, Immunosuppression, Radiation exposure",
            symptoms: "Frequent infections, Weight loss, Fatigue",
        },
        high: StateText {
            condition: "Viral infection, Chronic infection, Lymphoma",
            symptoms: "Swollen lymph nodes, Fever, Night sweats",
        },
    },
    TestDefinition {
        code: "MON%",
        name: "MON%",
        units: "%",
        ranges: ReferenceRanges::Default(range!(2, 10)),
        low: StateText {
            condition: "",
            symptoms: "",
        },
        high: StateText {
            condition: "Chronic infection, Autoimmune disease, Myeloproliferative disorder",
            symptoms: "",
        },
    },
    TestDefinition {
        code: "EOS%",
        name: "EOS%",
        units: "%",
        ranges: ReferenceRanges::Default(range!(0, 6)),
        low: StateText {
            condition: "",
            symptoms: "",
        },
        high: StateText {
            condition: "Allergic disorder, Parasitic infection, Autoimmune disease",
            symptoms: "",
        },
    },
    TestDefinition {
        code: "BAS%",
        name: "BAS%",
        units: "%",
        ranges: ReferenceRanges::Default(range!(0, 2)),
        low: StateText {
            condition: "",
            symptoms: "",
        },
        high: StateText {
            condition: "Allergic reaction, Chronic inflammation, Myeloproliferative disorder",
            symptoms: "",
        },
    },
    TestDefinition {
        code: "LYM#",
        name: "LYM#",
        units: "×10³/μL",
        ranges: ReferenceRanges::Default(range!(1.0, 4.0)),
        low: StateText {
            condition: "HIV/AIDS, Immunosuppression",
            symptoms: "Frequent infections, Weight loss, Fatigue",
        },
        high: StateText {
            condition: "Viral infection, Lymphoma",
            symptoms: "Swollen lymph nodes, Fever, Night sweats",
        },
    },
    TestDefinition {
        code: "GRA#",
        name: "GRA#",
        units: "×10³/μL",
        ranges: ReferenceRanges::Default(range!(1.8, 7.0)),
        low: StateText {
            condition: "Chemotherapy effect, Bone marrow failure",
            symptoms: "",
        },
        high: StateText {
            condition: "Bacterial infection, Inflammation",
            symptoms: "",
        },
    },
    TestDefinition {
        code: "PLT",
        name: "Platelets",
        units: "×10³/μL",
        ranges: ReferenceRanges::Default(range!(150, 450)),
        low: StateText {
            condition: "Viral infection, Autoimmune disorder, Bone marrow disorder",
            symptoms: "Easy bruising, Prolonged bleeding, Petechiae (small red spots)",
        },
        high: StateText {
            condition: "Inflammation, Iron deficiency, Myeloproliferative disorder",
            symptoms: "Headache, Dizziness, Blood clots (in extreme cases)",
        },
    },
    TestDefinition {
        code: "ESR",
        name: "Erythrocyte Sedimentation Rate",
        units: "mm/hr",
        ranges: ReferenceRanges::ByGender {
            male: range!(0, 15),
            female: range!(0, 20),
        },
        low: StateText {
            condition: "Not clinically significant",
            symptoms: "None",
        },
        high: StateText {
            condition: "Inflammation, Infection, Autoimmune disease, Malignancy",
            symptoms: "Depends on underlying condition (joint pain, fever, fatigue)",
        },
    },
];

/// Conditions the classifier may predict, with follow-up advice.
pub static ABNORMALITIES: &[Abnormality] = &[
    Abnormality {
        name: "Allergic reaction",
        description: "An immune system response to a foreign substance that is typically harmless to most people.",
        recommendations: &[
            "Identify and avoid known allergens",
            "Use antihistamines for mild reactions",
            "Carry epinephrine auto-injector if severe allergies exist",
            "Consult an allergist for testing and management",
        ],
    },
    Abnormality {
        name: "Anemia",
        description: "Low hemoglobin may indicate anemia, which can be caused by iron deficiency, vitamin B12 deficiency, chronic disease, or blood loss.",
        recommendations: &[
            "Increase iron-rich foods (red meat, spinach, lentils)",
            "Consume vitamin C to enhance iron absorption",
            "Consider iron supplements if deficient",
            "Consult doctor if symptoms persist",
        ],
    },
    Abnormality {
        name: "Autoimmune disease",
        description: "A condition where the immune system mistakenly attacks the body's own tissues.",
        recommendations: &[
            "Consult a rheumatologist for proper diagnosis",
            "Monitor for worsening symptoms",
            "Follow prescribed treatment plan",
            "Maintain regular follow-up appointments",
        ],
    },
    Abnormality {
        name: "Bacterial infection",
        description: "An infection caused by harmful bacteria multiplying in the body.",
        recommendations: &[
            "Complete prescribed antibiotic course",
            "Increase fluid intake",
            "Get adequate rest",
            "Monitor for fever or worsening symptoms",
        ],
    },
    Abnormality {
        name: "Blood loss",
        description: "Reduction in blood volume, potentially leading to anemia.",
        recommendations: &[
            "Identify and address source of bleeding",
            "Increase iron-rich foods to support recovery",
            "Monitor for signs of anemia (fatigue, pallor)",
            "Seek medical attention for significant blood loss",
        ],
    },
    Abnormality {
        name: "Bone marrow disorder",
        description: "Conditions affecting blood cell production in the bone marrow.",
        recommendations: &[
            "Consult a hematologist for evaluation",
            "Monitor blood counts regularly",
            "Avoid activities that may cause bleeding",
            "Follow recommended treatment plan",
        ],
    },
    Abnormality {
        name: "Chronic inflammation",
        description: "Long-term inflammatory response that can damage tissues.",
        recommendations: &[
            "Follow anti-inflammatory diet (rich in fruits, vegetables, omega-3s)",
            "Maintain healthy weight",
            "Exercise regularly",
            "Manage stress through relaxation techniques",
        ],
    },
    Abnormality {
        name: "Hemolysis",
        description: "Premature destruction of red blood cells leading to anemia.",
        recommendations: &[
            "Identify and treat underlying cause",
            "Monitor for jaundice or dark urine",
            "Increase folic acid intake",
            "Consult hematologist for evaluation",
        ],
    },
    Abnormality {
        name: "Iron deficiency",
        description: "Insufficient iron stores to meet the body's needs.",
        recommendations: &[
            "Increase dietary iron intake (red meat, beans, fortified cereals)",
            "Combine iron-rich foods with vitamin C sources",
            "Avoid tea/coffee with meals (can inhibit iron absorption)",
            "Consider iron supplements if recommended by doctor",
        ],
    },
    Abnormality {
        name: "Iron deficiency anemia",
        description: "Anemia resulting from insufficient iron to produce hemoglobin.",
        recommendations: &[
            "Increase iron-rich foods in diet",
            "Take iron supplements as prescribed",
            "Retest hemoglobin after treatment period",
            "Investigate potential causes of iron loss",
        ],
    },
    Abnormality {
        name: "Kidney disease",
        description: "Impaired kidney function affecting blood cell production.",
        recommendations: &[
            "Monitor kidney function tests",
            "Control blood pressure and diabetes if present",
            "Follow renal diet if recommended",
            "Consult nephrologist for management",
        ],
    },
    Abnormality {
        name: "Thalassemia",
        description: "Genetic disorder causing abnormal hemoglobin production.",
        recommendations: &[
            "Consult hematologist for specialized care",
            "Monitor iron levels (avoid unnecessary supplements)",
            "Consider genetic counseling",
            "Maintain regular follow-up appointments",
        ],
    },
    Abnormality {
        name: "Vitamin B12 deficiency",
        description: "Insufficient B12 affecting red blood cell production.",
        recommendations: &[
            "Increase animal product consumption (meat, eggs, dairy)",
            "Consider B12 supplements or injections",
            "Get tested for pernicious anemia",
            "Monitor neurological symptoms",
        ],
    },
    Abnormality {
        name: "Myeloproliferative disorder",
        description: "Conditions causing overproduction of blood cells by bone marrow.",
        recommendations: &[
            "Consult hematologist for specialized care",
            "Monitor blood counts regularly",
            "Follow prescribed treatment plan",
            "Report any unusual bleeding or clotting",
        ],
    },
    Abnormality {
        name: "Lymphoma",
        description: "Cancer of the lymphatic system affecting blood cells.",
        recommendations: &[
            "Consult oncologist for evaluation",
            "Follow recommended diagnostic tests",
            "Discuss treatment options with specialist",
            "Seek support from cancer care team",
        ],
    },
    Abnormality {
        name: "Chronic infection",
        description: "Persistent infection affecting blood cell production.",
        recommendations: &[
            "Identify and treat underlying infection",
            "Support immune system with balanced nutrition",
            "Get adequate rest",
            "Follow prescribed treatment regimen",
        ],
    },
];
