use crate::models::dto::generated_question::generated_question_schema;
use crate::models::dto::{ExplainAnswerRequest, GenerateQuizRequest};

pub fn quiz_generation_prompt(request: &GenerateQuizRequest) -> String {
    let performance_line = request
        .previous_performance
        .map(|percent| {
            format!(
                "- The learner has scored {:.0}% so far; pitch the questions accordingly\n",
                percent
            )
        })
        .unwrap_or_default();

    format!(
        "Based on the following educational content, generate exactly {count} multiple choice questions at {level} level.

Content: \"{content}\"

Requirements:
- Each question should have exactly 4 options (A, B, C, D)
- Questions should test different concepts from the content
- Include a brief explanation for the correct answer
- Identify the main concept being tested
{performance_line}
Each item must conform to this JSON schema:
{schema}

Return ONLY a valid JSON array in this exact format:
[
  {{
    \"question\": \"Question text here?\",
    \"options\": [\"Option A\", \"Option B\", \"Option C\", \"Option D\"],
    \"correctAnswer\": 0,
    \"explanation\": \"Brief explanation of why this is correct\",
    \"concept\": \"Main concept being tested\"
  }}
]",
        count = request.question_count,
        level = request.difficulty.descriptor(),
        content = request.content,
        performance_line = performance_line,
        schema = generated_question_schema(),
    )
}

/// Tone of the explanation, gentler for learners who are struggling.
pub fn support_level(performance_percent: f64) -> &'static str {
    if performance_percent < 60.0 {
        "very encouraging and detailed"
    } else if performance_percent < 80.0 {
        "supportive with helpful tips"
    } else {
        "brief but positive"
    }
}

pub fn explanation_prompt(request: &ExplainAnswerRequest) -> String {
    format!(
        "The student answered: \"{user_answer}\"
The correct answer was: \"{correct_answer}\"
Question: \"{question}\"
Student's overall performance: {performance:.0}%

Provide a {support} explanation that:
1. Explains why the correct answer is right
2. Helps the student understand the concept better
3. Gives a learning tip for similar questions
4. Keep it under 100 words

Be encouraging and educational.",
        user_answer = request.user_answer,
        correct_answer = request.correct_answer,
        question = request.question,
        performance = request.user_performance,
        support = support_level(request.user_performance),
    )
}
