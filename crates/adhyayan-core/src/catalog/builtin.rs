use super::{slugify, CatalogNode, NodeKind};

/// (name, aliases, topics)
type SubjectDef = (&'static str, &'static [&'static str], &'static [&'static str]);

fn subject((name, aliases, topics): &SubjectDef) -> CatalogNode {
    CatalogNode::new(NodeKind::Subject, slugify(name), *name)
        .with_aliases(aliases)
        .with_children(
            topics
                .iter()
                .map(|t| CatalogNode::new(NodeKind::Topic, slugify(t), *t))
                .collect(),
        )
}

fn year(number: u8, subjects: &[SubjectDef]) -> CatalogNode {
    let (slug, name, aliases): (&str, &str, &[&str]) = match number {
        1 => (
            "1st-year",
            "1st Year",
            &["1", "1st", "first", "first year", "year 1", "fy", "i"],
        ),
        2 => (
            "2nd-year",
            "2nd Year",
            &["2", "2nd", "second", "second year", "year 2", "sy", "ii"],
        ),
        3 => (
            "3rd-year",
            "3rd Year",
            &["3", "3rd", "third", "third year", "year 3", "ty", "iii"],
        ),
        _ => (
            "4th-year",
            "4th Year",
            &["4", "4th", "fourth", "fourth year", "final year", "year 4", "iv"],
        ),
    };
    CatalogNode::new(NodeKind::Year, slug, name)
        .with_aliases(aliases)
        .with_children(subjects.iter().map(subject).collect())
}

fn branch(
    slug: &str,
    name: &str,
    aliases: &[&str],
    years: [&[SubjectDef]; 4],
) -> CatalogNode {
    CatalogNode::new(NodeKind::Branch, slug, name)
        .with_aliases(aliases)
        .with_children(
            years
                .iter()
                .enumerate()
                .map(|(i, subjects)| year(i as u8 + 1, subjects))
                .collect(),
        )
}

const ENGINEERING_FIRST_YEAR: &[SubjectDef] = &[
    (
        "Engineering Mathematics I",
        &["Maths 1", "M1", "Mathematics I"],
        &["Differential Calculus", "Integral Calculus", "Matrices", "Sequences and Series"],
    ),
    (
        "Engineering Physics",
        &["Physics"],
        &["Quantum Mechanics", "Optics", "Lasers", "Semiconductors"],
    ),
    (
        "Engineering Chemistry",
        &["Chemistry"],
        &["Water Technology", "Electrochemistry", "Polymers", "Corrosion"],
    ),
    (
        "Basic Electrical Engineering",
        &["BEE"],
        &["DC Circuits", "AC Circuits", "Transformers", "Electrical Machines"],
    ),
    (
        "Programming for Problem Solving",
        &["PPS", "C Programming"],
        &["Control Flow", "Functions", "Arrays and Strings", "Pointers", "Structures"],
    ),
    (
        "Engineering Graphics",
        &["EG", "Engineering Drawing"],
        &["Orthographic Projection", "Isometric Views", "Sections of Solids"],
    ),
];

const CSE_SECOND_YEAR: &[SubjectDef] = &[
    (
        "Data Structures",
        &["DS", "DSA"],
        &["Arrays", "Linked Lists", "Stacks and Queues", "Trees", "Graphs", "Hashing"],
    ),
    (
        "Discrete Mathematics",
        &["DM", "Discrete Maths"],
        &["Set Theory", "Relations and Functions", "Graph Theory", "Combinatorics"],
    ),
    (
        "Digital Logic",
        &["DLD", "Digital Electronics"],
        &["Boolean Algebra", "Combinational Circuits", "Sequential Circuits"],
    ),
    (
        "Object Oriented Programming",
        &["OOP", "OOPS", "Java"],
        &["Classes and Objects", "Inheritance", "Polymorphism", "Exception Handling"],
    ),
    (
        "Computer Organization and Architecture",
        &["COA", "CO"],
        &["Instruction Sets", "Pipelining", "Memory Hierarchy", "Input Output"],
    ),
];

const CSE_THIRD_YEAR: &[SubjectDef] = &[
    (
        "Database Management Systems",
        &["DBMS", "Databases"],
        &["ER Model", "Relational Algebra", "SQL", "Normalization", "Transactions"],
    ),
    (
        "Operating Systems",
        &["OS"],
        &["Processes and Threads", "CPU Scheduling", "Deadlocks", "Memory Management", "File Systems"],
    ),
    (
        "Computer Networks",
        &["CN"],
        &["Physical Layer", "Data Link Layer", "Network Layer", "Transport Layer", "Application Layer"],
    ),
    (
        "Design and Analysis of Algorithms",
        &["DAA", "Algorithms"],
        &["Divide and Conquer", "Greedy Algorithms", "Dynamic Programming", "NP Completeness"],
    ),
    (
        "Theory of Computation",
        &["TOC", "Automata"],
        &["Finite Automata", "Regular Expressions", "Context Free Grammars", "Turing Machines"],
    ),
];

const CSE_FOURTH_YEAR: &[SubjectDef] = &[
    (
        "Compiler Design",
        &["CD", "Compilers"],
        &["Lexical Analysis", "Parsing", "Syntax Directed Translation", "Code Optimization"],
    ),
    (
        "Machine Learning",
        &["ML"],
        &["Regression", "Classification", "Clustering", "Neural Networks"],
    ),
    (
        "Cloud Computing",
        &["CC"],
        &["Virtualization", "Service Models", "Cloud Storage"],
    ),
    (
        "Information Security",
        &["Cryptography", "Network Security"],
        &["Symmetric Ciphers", "Public Key Cryptography", "Authentication Protocols"],
    ),
];

const IT_SECOND_YEAR: &[SubjectDef] = &[
    (
        "Data Structures",
        &["DS", "DSA"],
        &["Arrays", "Linked Lists", "Stacks and Queues", "Trees", "Graphs"],
    ),
    (
        "Object Oriented Programming",
        &["OOP", "OOPS", "Java"],
        &["Classes and Objects", "Inheritance", "Polymorphism"],
    ),
    (
        "Digital Logic",
        &["DLD", "Digital Electronics"],
        &["Boolean Algebra", "Combinational Circuits", "Sequential Circuits"],
    ),
    (
        "Probability and Statistics",
        &["PS", "Statistics"],
        &["Random Variables", "Distributions", "Hypothesis Testing"],
    ),
];

const IT_THIRD_YEAR: &[SubjectDef] = &[
    (
        "Database Management Systems",
        &["DBMS", "Databases"],
        &["ER Model", "SQL", "Normalization", "Transactions"],
    ),
    (
        "Web Technologies",
        &["WT", "Web Development"],
        &["HTML and CSS", "JavaScript", "Server Side Programming", "REST APIs"],
    ),
    (
        "Operating Systems",
        &["OS"],
        &["Processes and Threads", "CPU Scheduling", "Memory Management"],
    ),
    (
        "Computer Networks",
        &["CN"],
        &["Network Layer", "Transport Layer", "Application Layer"],
    ),
];

const IT_FOURTH_YEAR: &[SubjectDef] = &[
    (
        "Software Engineering",
        &["SE"],
        &["Process Models", "Requirements Engineering", "Software Testing"],
    ),
    (
        "Data Mining",
        &["DM", "Data Warehousing"],
        &["Association Rules", "Classification", "Clustering"],
    ),
    (
        "Mobile Computing",
        &["MC"],
        &["Cellular Networks", "Mobile IP", "Android Development"],
    ),
];

const ECE_SECOND_YEAR: &[SubjectDef] = &[
    (
        "Electronic Devices and Circuits",
        &["EDC"],
        &["Diodes", "BJT", "FET", "Amplifiers"],
    ),
    (
        "Network Analysis",
        &["NA", "Circuit Theory"],
        &["Network Theorems", "Transient Analysis", "Two Port Networks"],
    ),
    (
        "Signals and Systems",
        &["SS"],
        &["Fourier Series", "Fourier Transform", "Laplace Transform", "Z Transform"],
    ),
    (
        "Digital Electronics",
        &["DE"],
        &["Logic Gates", "Combinational Circuits", "Sequential Circuits"],
    ),
];

const ECE_THIRD_YEAR: &[SubjectDef] = &[
    (
        "Analog Communication",
        &["AC"],
        &["Amplitude Modulation", "Frequency Modulation", "Noise"],
    ),
    (
        "Digital Communication",
        &["DC"],
        &["Pulse Modulation", "Digital Modulation", "Information Theory"],
    ),
    (
        "Microprocessors and Microcontrollers",
        &["MPMC", "8085", "8051"],
        &["8085 Architecture", "8086 Programming", "8051 Interfacing"],
    ),
    (
        "Control Systems",
        &["CS"],
        &["Transfer Functions", "Time Response", "Stability Analysis"],
    ),
];

const ECE_FOURTH_YEAR: &[SubjectDef] = &[
    (
        "VLSI Design",
        &["VLSI"],
        &["CMOS Logic", "Fabrication", "Verilog"],
    ),
    (
        "Antennas and Wave Propagation",
        &["AWP"],
        &["Antenna Parameters", "Antenna Arrays", "Wave Propagation"],
    ),
    (
        "Digital Signal Processing",
        &["DSP"],
        &["DFT and FFT", "FIR Filters", "IIR Filters"],
    ),
];

const EE_SECOND_YEAR: &[SubjectDef] = &[
    (
        "Electrical Circuit Analysis",
        &["ECA", "Circuit Analysis"],
        &["Network Theorems", "Resonance", "Three Phase Circuits"],
    ),
    (
        "Electrical Machines I",
        &["EM1", "Machines 1"],
        &["DC Machines", "Transformers"],
    ),
    (
        "Analog Electronics",
        &["AE"],
        &["Diodes", "Transistors", "Operational Amplifiers"],
    ),
];

const EE_THIRD_YEAR: &[SubjectDef] = &[
    (
        "Power Systems",
        &["PS1"],
        &["Transmission Lines", "Load Flow", "Fault Analysis"],
    ),
    (
        "Power Electronics",
        &["PE"],
        &["Thyristors", "Converters", "Inverters"],
    ),
    (
        "Control Systems",
        &["CS"],
        &["Transfer Functions", "Time Response", "Stability Analysis"],
    ),
];

const EE_FOURTH_YEAR: &[SubjectDef] = &[
    (
        "Electric Drives",
        &["ED"],
        &["DC Drives", "Induction Motor Drives"],
    ),
    (
        "Switchgear and Protection",
        &["SGP"],
        &["Circuit Breakers", "Relays", "Protection Schemes"],
    ),
];

const ME_SECOND_YEAR: &[SubjectDef] = &[
    (
        "Engineering Thermodynamics",
        &["Thermo", "Thermodynamics"],
        &["Laws of Thermodynamics", "Entropy", "Properties of Steam"],
    ),
    (
        "Strength of Materials",
        &["SOM", "Mechanics of Solids"],
        &["Stress and Strain", "Bending Moment", "Torsion"],
    ),
    (
        "Manufacturing Processes",
        &["MP"],
        &["Casting", "Welding", "Forming"],
    ),
];

const ME_THIRD_YEAR: &[SubjectDef] = &[
    (
        "Fluid Mechanics",
        &["FM"],
        &["Fluid Statics", "Fluid Kinematics", "Flow Through Pipes"],
    ),
    (
        "Theory of Machines",
        &["TOM"],
        &["Mechanisms", "Gears", "Cams", "Vibrations"],
    ),
    (
        "Heat Transfer",
        &["HT"],
        &["Conduction", "Convection", "Radiation"],
    ),
];

const ME_FOURTH_YEAR: &[SubjectDef] = &[
    (
        "Machine Design",
        &["MD"],
        &["Design of Shafts", "Bearings", "Springs"],
    ),
    (
        "Refrigeration and Air Conditioning",
        &["RAC"],
        &["Vapour Compression", "Psychrometry"],
    ),
];

const CE_SECOND_YEAR: &[SubjectDef] = &[
    (
        "Surveying",
        &["SUR"],
        &["Chain Surveying", "Levelling", "Theodolite"],
    ),
    (
        "Strength of Materials",
        &["SOM", "Mechanics of Solids"],
        &["Stress and Strain", "Bending Moment", "Torsion"],
    ),
    (
        "Building Materials and Construction",
        &["BMC"],
        &["Bricks and Stones", "Cement and Concrete", "Masonry"],
    ),
];

const CE_THIRD_YEAR: &[SubjectDef] = &[
    (
        "Structural Analysis",
        &["SA"],
        &["Influence Lines", "Moment Distribution", "Arches"],
    ),
    (
        "Geotechnical Engineering",
        &["Soil Mechanics", "GTE"],
        &["Soil Classification", "Compaction", "Consolidation"],
    ),
    (
        "Transportation Engineering",
        &["TE", "Highway Engineering"],
        &["Highway Geometric Design", "Pavement Design", "Traffic Engineering"],
    ),
];

const CE_FOURTH_YEAR: &[SubjectDef] = &[
    (
        "Design of Steel Structures",
        &["DSS"],
        &["Bolted Connections", "Tension Members", "Compression Members"],
    ),
    (
        "Environmental Engineering",
        &["EE", "Environment"],
        &["Water Treatment", "Wastewater Treatment", "Air Pollution"],
    ),
];

const SCIENCE_FIRST_YEAR: &[SubjectDef] = &[
    (
        "Calculus",
        &[],
        &["Limits and Continuity", "Differentiation", "Integration"],
    ),
    (
        "Mechanics",
        &[],
        &["Newton's Laws", "Work and Energy", "Rotational Motion"],
    ),
    (
        "Inorganic Chemistry",
        &[],
        &["Atomic Structure", "Chemical Bonding", "Periodic Properties"],
    ),
];

const PHYSICS_UPPER: &[SubjectDef] = &[
    (
        "Electromagnetism",
        &["EMT"],
        &["Electrostatics", "Magnetostatics", "Maxwell's Equations"],
    ),
    (
        "Quantum Physics",
        &["QM"],
        &["Wave Functions", "Schrodinger Equation", "Angular Momentum"],
    ),
];

const CHEMISTRY_UPPER: &[SubjectDef] = &[
    (
        "Organic Chemistry",
        &["OC"],
        &["Reaction Mechanisms", "Stereochemistry", "Aromatic Compounds"],
    ),
    (
        "Physical Chemistry",
        &["PC"],
        &["Chemical Kinetics", "Thermochemistry", "Electrochemistry"],
    ),
];

const MATHEMATICS_UPPER: &[SubjectDef] = &[
    (
        "Real Analysis",
        &["RA"],
        &["Sequences", "Series", "Riemann Integration"],
    ),
    (
        "Abstract Algebra",
        &["Algebra"],
        &["Groups", "Rings", "Fields"],
    ),
];

/// The compiled-in hierarchy. Department order is significant: the matcher
/// prefers earlier candidates within a tier.
pub(super) fn departments() -> Vec<CatalogNode> {
    vec![
        CatalogNode::new(NodeKind::Department, "engineering", "Engineering")
            .with_aliases(&["B.Tech", "BTech", "B.E.", "BE", "Engineering College"])
            .with_children(vec![
                branch(
                    "cse",
                    "Computer Science & Engineering",
                    &["CSE", "CS", "Computer Science", "Computer Science and Engineering"],
                    [ENGINEERING_FIRST_YEAR, CSE_SECOND_YEAR, CSE_THIRD_YEAR, CSE_FOURTH_YEAR],
                ),
                branch(
                    "it",
                    "Information Technology",
                    &["IT", "Info Tech"],
                    [ENGINEERING_FIRST_YEAR, IT_SECOND_YEAR, IT_THIRD_YEAR, IT_FOURTH_YEAR],
                ),
                branch(
                    "ece",
                    "Electronics & Communication Engineering",
                    &["ECE", "EC", "Electronics and Communication", "Electronics and Communication Engineering"],
                    [ENGINEERING_FIRST_YEAR, ECE_SECOND_YEAR, ECE_THIRD_YEAR, ECE_FOURTH_YEAR],
                ),
                branch(
                    "ee",
                    "Electrical Engineering",
                    &["EE", "EEE", "Electrical", "Electrical and Electronics Engineering"],
                    [ENGINEERING_FIRST_YEAR, EE_SECOND_YEAR, EE_THIRD_YEAR, EE_FOURTH_YEAR],
                ),
                branch(
                    "me",
                    "Mechanical Engineering",
                    &["ME", "Mech", "Mechanical"],
                    [ENGINEERING_FIRST_YEAR, ME_SECOND_YEAR, ME_THIRD_YEAR, ME_FOURTH_YEAR],
                ),
                branch(
                    "ce",
                    "Civil Engineering",
                    &["CE", "Civil"],
                    [ENGINEERING_FIRST_YEAR, CE_SECOND_YEAR, CE_THIRD_YEAR, CE_FOURTH_YEAR],
                ),
            ]),
        CatalogNode::new(NodeKind::Department, "science", "Science")
            .with_aliases(&["B.Sc", "BSc", "B.Sc."])
            .with_children(vec![
                branch(
                    "physics",
                    "Physics",
                    &["Phy", "B.Sc Physics"],
                    [SCIENCE_FIRST_YEAR, PHYSICS_UPPER, PHYSICS_UPPER, PHYSICS_UPPER],
                ),
                branch(
                    "chemistry",
                    "Chemistry",
                    &["Chem", "B.Sc Chemistry"],
                    [SCIENCE_FIRST_YEAR, CHEMISTRY_UPPER, CHEMISTRY_UPPER, CHEMISTRY_UPPER],
                ),
                branch(
                    "mathematics",
                    "Mathematics",
                    &["Maths", "Math", "B.Sc Mathematics"],
                    [SCIENCE_FIRST_YEAR, MATHEMATICS_UPPER, MATHEMATICS_UPPER, MATHEMATICS_UPPER],
                ),
            ]),
    ]
}
