use severity_lib::{Category, Record};

pub const SYMPTOMS: [&str; 9] = [
    "Fatigue",
    "Weakness",
    "Depression",
    "Anxiety",
    "Headaches",
    "Tingling",
    "Insomnia",
    "Spasms",
    "Cramps",
];

const COMMON_SYMPTOMS: usize = 7;

pub fn create_test_record(count: u32, spasms: bool, cramps: bool, actual: Category) -> Record {
    Record::builder()
        .symptom("Spasms", spasms)
        .symptom("Cramps", cramps)
        .symptom_count(count)
        .category(actual)
        .build()
}

/// A full record whose flags add up to its symptom count and which the
/// default rules classify as `predicted`. `variant` picks between the
/// several shapes each outcome can take.
pub fn patient(id: usize, actual: Category, predicted: Category, variant: usize) -> Record {
    let (common, spasms, cramps) = match predicted {
        Category::Mild => (variant % 3, false, false),
        Category::Moderate => (3 + variant % 3, false, false),
        Category::Severe => match variant % 3 {
            0 => (2, true, false),
            1 => (1, false, true),
            _ => (6 + variant % 2, false, false),
        },
    };

    let mut builder = Record::builder().id(format!("P{:03}", id));
    for (i, name) in SYMPTOMS[..COMMON_SYMPTOMS].iter().enumerate() {
        builder = builder.symptom(*name, i < common);
    }
    let count = common + usize::from(spasms) + usize::from(cramps);

    builder
        .symptom("Spasms", spasms)
        .symptom("Cramps", cramps)
        .symptom_count(count as u32)
        .category(actual)
        .build()
}

/// Observed outcome counts, rows actual and columns predicted, Mild/Moderate/Severe order.
pub const OBSERVED: [[usize; 3]; 3] = [[86, 12, 2], [9, 86, 5], [0, 16, 84]];

/// 300 patients, 100 per actual category, reproducing the observed outcome counts.
pub fn observed_cohort() -> Vec<Record> {
    let mut records = Vec::new();
    for (a, actual) in Category::ALL.into_iter().enumerate() {
        for (p, predicted) in Category::ALL.into_iter().enumerate() {
            for variant in 0..OBSERVED[a][p] {
                let id = records.len() + 1;
                records.push(patient(id, actual, predicted, variant));
            }
        }
    }
    records
}

/// Render records as a symptom table CSV with the default column names.
pub fn to_csv(records: &[Record]) -> String {
    let mut out = String::from("Patient ID,");
    out.push_str(&SYMPTOMS.join(","));
    out.push_str(",Number of Symptoms,Final Category\n");

    for record in records {
        let mut fields = vec![record.id().unwrap_or("").to_string()];
        for name in SYMPTOMS {
            fields.push(match record.symptom(name) {
                Ok(true) => "1".to_string(),
                Ok(false) => "0".to_string(),
                Err(_) => String::new(),
            });
        }
        fields.push(
            record
                .symptom_count()
                .map(|c| c.to_string())
                .unwrap_or_default(),
        );
        fields.push(record.actual_label().unwrap_or("").to_string());
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}
