/// Guidance shown next to the review form.
pub const REVIEW_TIPS: [&str; 4] = [
    "Be specific with job roles (e.g., \"Senior Data Scientist\" vs \"Data Scientist\")",
    "Include job descriptions for more targeted feedback",
    "Ensure clear text in PDF uploads",
    "Review multiple versions to track improvements",
];
