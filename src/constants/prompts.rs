/// Persona and authoring rules sent as the system message. `{exam_code}` is
/// substituted at render time.
pub const SYSTEM_INSTRUCTION_TEMPLATE: &str = "You are a knowledgeable assistant that understands the {exam_code} exam topics and structure. \
You will act as a quiz generator for the {exam_code} exam, and your questions should closely follow the format and content of the actual exam. \
Ensure that the questions are varied, non-repetitive, and cover a wide range of topics within the exam scope. \
Pay attention to the following guidelines:
1. Questions should be clear, concise, and unambiguous.
2. Use appropriate terminology and concepts relevant to the exam.
3. Ensure that incorrect options (distractors) are plausible but clearly incorrect.
4. Provide detailed explanations for both correct and incorrect answers.
5. Align the difficulty level with the specified requirement (easy, medium, hard).
6. For multi-response questions, clearly indicate that multiple options may be correct.
7. Avoid using absolute terms like 'always' or 'never' unless specifically pointing to a correct or incorrect answer.
8. Ensure that the correct answer(s) fully address the question asked.
9. Use real-world scenarios when appropriate to test practical understanding.
10. Adhere strictly to the JSON format specified in the prompt.";

pub const MULTIPLE_CHOICE_FORMAT: &str = " with 4 options. Format the answer as a JSON object with these fields: \
\"question\", \"options\" (a list of options), \
\"correct_answer\" (integer index starting from 1), \
and \"explanations\" (an object mapping option numbers to explanations).";

pub const MULTIPLE_CHOICE_EXAMPLE: &str = r#"{
  "question": "Your company is planning to migrate to Microsoft Azure and Microsoft 365. You are required to identify a cloud service that allows for website hosting. Which of the following is the model you should choose?",
  "options": ["Software as a Service (SaaS)", "Platform as a Service (PaaS)", "Infrastructure as a Service (IaaS)", "Container as a Service (CaaS)"],
  "correct_answer": 2,
  "explanations": {
    "1": "Software as a Service (SaaS) provides access to software applications over the internet, but does not typically offer direct website hosting capabilities. Examples include Microsoft 365 apps.",
    "2": "Platform as a Service (PaaS) is the correct choice for website hosting. It provides a platform allowing customers to develop, run, and manage applications without the complexity of building and maintaining the infrastructure. Azure App Service is an example of PaaS that supports website hosting.",
    "3": "Infrastructure as a Service (IaaS) provides virtualized computing resources over the internet. While it can be used for website hosting, it requires more management and configuration compared to PaaS, making it less suitable for this specific requirement.",
    "4": "Container as a Service (CaaS) is a cloud service model that allows users to upload, organize, run, scale, and manage containers. While it can be used for hosting websites, it is not typically the primary choice for simple website hosting scenarios."
  }
}"#;

pub const TRUE_FALSE_FORMAT: &str = ". Format the answer as a JSON object with fields: \
\"question\", \"options\" ([\"True\", \"False\"]), \
\"correct_answer\" (1 for True, 2 for False), \
and \"explanations\" (an object mapping option numbers to explanations).";

pub const TRUE_FALSE_EXAMPLE: &str = r#"{
  "question": "Microsoft Planner can be used to provide customized appointments that customers can schedule on a website.",
  "options": ["True", "False"],
  "correct_answer": 2,
  "explanations": {
    "1": "This is incorrect. Microsoft Planner is a task management tool designed for team collaboration and project management. It does not have built-in functionality for customer appointment scheduling on websites.",
    "2": "This is correct. Microsoft Planner is not designed for customer appointment scheduling. For this purpose, Microsoft offers a different tool called Microsoft Bookings, which is specifically designed to allow customers to schedule appointments through a web interface."
  }
}"#;

pub const MULTI_RESPONSE_FORMAT: &str = " with 4-6 options, where multiple options may be correct. Format the answer as a JSON object with fields: \
\"question\", \"options\" (list of options), \
\"correct_answers\" (list of integer indices starting from 1), \
and \"explanations\" (an object mapping option numbers to explanations). \
Be sure to specify that multiple options may be correct. In some cases you will specify the exact number of correct options in the question or requirements.";

pub const MULTI_RESPONSE_EXAMPLE: &str = r#"{
  "question": "A company plans to migrate on-premises infrastructure to the cloud. What are three benefits of migrating to the cloud? Each correct answer presents a complete solution.",
  "options": ["Reduce configuration requirements on desktop computers.", "Reduce on-site network latency.", "Automate data backup and disaster recovery.", "Scale and extend applications.", "Eliminate the cost of buying server hardware."],
  "correct_answers": [3, 4, 5],
  "explanations": {
    "1": "This is incorrect. While cloud migration can simplify some aspects of IT management, it typically does not significantly reduce configuration requirements on desktop computers.",
    "2": "This is incorrect. Migrating to the cloud does not inherently reduce on-site network latency. It may introduce additional latency for accessing cloud-based resources.",
    "3": "This is correct. Cloud services often provide built-in tools for automating data backup and disaster recovery, improving data protection and business continuity.",
    "4": "This is correct. Cloud platforms let businesses scale resources up or down based on demand and extend applications with new capabilities.",
    "5": "This is correct. By migrating to the cloud, companies can reduce or eliminate the need to purchase and maintain physical server hardware."
  }
}"#;
