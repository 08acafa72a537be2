//! Shop-maintained FAQ and service tables.

pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
    pub category: &'static str,
    pub tags: &'static [&'static str],
}

pub struct ServiceEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub category: &'static str,
}

pub const FAQS: &[FaqEntry] = &[
    FaqEntry {
        question: "What's the difference between domestic and industrial sewing machines?",
        answer: "Domestic machines are designed for home use with lighter fabrics and occasional sewing. Industrial machines like JACK F5 are built for heavy-duty, continuous use with thicker materials and higher speeds (up to 5,000 SPM). Industrial machines also have features like automatic lubrication, thread trimming, and energy-efficient motors.",
        category: "Machine Types",
        tags: &["domestic", "industrial", "comparison", "features"],
    },
    FaqEntry {
        question: "How much does a JACK F5 industrial machine cost?",
        answer: "The JACK F5 industrial sewing machine is priced between ₹22,999-₹28,999. This includes the complete package with table, stand, oil pan, parts kit, and heavy-duty accessories. The price varies based on current market rates and any ongoing promotions.",
        category: "Pricing",
        tags: &["jack f5", "price", "cost", "industrial"],
    },
    FaqEntry {
        question: "What warranty do you provide on sewing machines?",
        answer: "We provide comprehensive warranties on all our machines: 1-year service warranty and 3-years board and PCB warranty. This covers parts, labor, and technical support to ensure your machine operates perfectly.",
        category: "Warranty",
        tags: &["warranty", "service", "support", "coverage"],
    },
    FaqEntry {
        question: "Do you provide installation and training services?",
        answer: "Yes! We provide professional installation and comprehensive hands-on training for all our machines. Our experts will set up your machine properly, teach you optimal usage techniques, and provide operation manuals and follow-up support.",
        category: "Services",
        tags: &["installation", "training", "setup", "support"],
    },
    FaqEntry {
        question: "What maintenance does an industrial sewing machine need?",
        answer: "Industrial machines need regular maintenance including oil changes, cleaning, tension adjustments, and periodic inspections. We offer AMC (Annual Maintenance Contract) packages that include regular check-ups, priority service, cost savings, and extended warranty coverage.",
        category: "Maintenance",
        tags: &["maintenance", "amc", "service", "care"],
    },
    FaqEntry {
        question: "Can you repair other brands of sewing machines?",
        answer: "Absolutely! Our expert technicians can repair all sewing machine brands using genuine spare parts. We handle common issues like skipped stitches, tension problems, unusual noises, and fabric snagging with quick turnaround times and quality guarantees.",
        category: "Repairs",
        tags: &["repair", "service", "brands", "technicians"],
    },
    FaqEntry {
        question: "What fabrics can the JACK F5 handle?",
        answer: "The JACK F5 is designed for light to heavy fabrics. It can handle cotton, denim, leather, synthetics, and upholstery materials. For very heavy work, there's an 'H' variant with stronger needles (DB×5 #18–21) and extended stitch length (7mm).",
        category: "Capabilities",
        tags: &["jack f5", "fabrics", "materials", "capabilities"],
    },
    FaqEntry {
        question: "How energy efficient are your industrial machines?",
        answer: "Our industrial machines are highly energy efficient. The JACK F5 uses a direct-drive motor that reduces power consumption by up to 70% compared to traditional clutch motors. The JACK A2B saves approximately 446 kWh per year, making them cost-effective for long-term use.",
        category: "Energy",
        tags: &["energy", "efficiency", "power", "cost"],
    },
    FaqEntry {
        question: "What payment methods do you accept?",
        answer: "We accept various payment methods including cash, bank transfers, UPI payments, and card payments. We also offer financing options and EMI plans to make your purchase more affordable. Contact us for detailed payment terms.",
        category: "Payment",
        tags: &["payment", "financing", "emi", "methods"],
    },
    FaqEntry {
        question: "Do you offer financing options?",
        answer: "Yes, we offer flexible financing options and EMI plans to make industrial sewing machines more accessible. We can work with your budget and provide customized payment plans. Contact our sales team for detailed financing information.",
        category: "Financing",
        tags: &["financing", "emi", "payment", "budget"],
    },
];

pub const SERVICES: &[ServiceEntry] = &[
    ServiceEntry {
        name: "Machine Sales",
        description: "Complete range of domestic and industrial sewing machines from trusted brands like JACK. Each machine comes with quality assurance, expert guidance, and complete service support.",
        features: &["Wide selection", "Expert consultation", "Quality assurance", "After-sales support"],
        category: "Sales",
    },
    ServiceEntry {
        name: "Repair & Maintenance",
        description: "Expert repair services for all sewing machine brands using genuine spare parts. Quick turnaround times with quality guarantees.",
        features: &["All brands supported", "Genuine parts", "Quick service", "Quality guarantee"],
        category: "Service",
    },
    ServiceEntry {
        name: "AMC Packages",
        description: "Annual Maintenance Contracts that include regular check-ups, priority service, cost savings, and extended warranty coverage.",
        features: &["Regular check-ups", "Priority service", "Cost savings", "Extended warranty"],
        category: "Service",
    },
    ServiceEntry {
        name: "Installation & Training",
        description: "Professional installation and comprehensive hands-on training for optimal machine usage and performance.",
        features: &["Professional setup", "Hands-on training", "Operation manuals", "Follow-up support"],
        category: "Service",
    },
];
