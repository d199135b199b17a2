//! Instruction template for the repurposing call.
//!
//! Nothing rewrites the model output afterwards, so these rules are the only
//! lever on shape and tone. The counts and ceilings here must stay in step with
//! the checks in [`crate::generator::validate`].

const PERSONA: &str = "You're a growth marketer with 5+ years of writing social content that actually performs. \
You can't stand generic AI writing. People save, share and comment on your posts because they sound human.";

const TASK: &str = "Your job: turn this article into platform-specific content that real people would engage with.";

const DIVIDER: &str = "===================================================================";

const LINKEDIN: &str = r#"1. LINKEDIN POSTS (3 distinct strategic angles)

POST 1: EDUCATIONAL ("aha moment")
Explain it the way you would to a colleague over coffee, not as a lecture.
Rules:
- Open with a specific, counterintuitive insight from the article (no question, no "I learned")
- 2-3 micro-paragraphs, each 1-2 sentences, one clear point each
- Close with a question that makes people think, never a generic "What do you think?"
- 80-120 words, blank line between paragraphs
Never open with: "In today's", "I want to share", "Let's talk about", "Here's why", "Have you ever"
Structure: [counterintuitive insight] / [what most people miss] / [practical implication] / [question tied to the reader's experience]

POST 2: CONTROVERSIAL ("challenge convention")
Argue it like a point in a meeting: confident, backed by evidence.
Rules:
- Open with a bold statement that contradicts common advice, no lead-in
- 3-5 short, punchy sentences
- At least one specific number, stat or concrete example from the article
- No emoji
- 70-100 words
Never open with: "Unpopular opinion", "Hot take", "Let me be honest", "Controversial but"
Structure: [claim stated as fact] / [why everyone gets it wrong] / [data from the article] / [what to do instead] / [sharp close]

POST 3: PERSONAL STORY ("lesson learned the hard way")
Real and relatable.
Rules:
- Open with "I used to [wrong belief]" or a similar admission
- Mini arc: what you thought, what happened, what you learned, tied to the article's insight
- Show genuine vulnerability (a mistake, confusion or struggle)
- End on the lesson, not a question
- 90-130 words
Never open with: "Let me tell you a story", "This reminds me of", "I'll never forget when""#;

const TWITTER: &str = r#"2. TWITTER/X THREAD HOOKS (3 distinct psychological triggers)

HOOK 1: PATTERN INTERRUPT
- Lead with "Most people think X. They're wrong." or a shocking stat with no setup
- Second sentence opens a curiosity gap about why or how
- End with a thread indicator such as "Here's what actually works:"
- Under 260 characters, no hashtags
Bad: "Most people don't understand X. Let me explain."

HOOK 2: CURIOSITY GAP
- Open with "I [action] for [specific timeframe]" or "I analyzed [specific number]"
- Follow with an unexpected result, using specific numbers (hours, dollars, attempts, companies)
- End with a preview of value: "What I learned:" or "The surprising part:"
- Under 260 characters
Bad: "I spent months researching this topic. Here's what I found."

HOOK 3: MISTAKE FRAMEWORK
- Open with "I made [specific number] mistakes [doing X]"
- Name the cost (time, money or opportunity) and promise the fix
- Under 260 characters
- Sound like a confession, not a brag
Bad: "I made mistakes with SEO. Here's what I learned.""#;

const META: &str = r#"3. META DESCRIPTION
- STRICT 155 character limit
- Front-load the main keyword or topic, then the specific benefit or outcome
- Active voice, no filler
Do not use: "discover", "explore", "learn more", "click here", "find out"
Prefer concrete outcomes, numbers, "avoid", "get", "choose", "build""#;

const YOUTUBE: &str = r#"4. YOUTUBE VIDEO ASSETS

TITLE (70 characters max, the mobile cutoff)
- Front-load the searched keyword
- Include a number, specific outcome or timeframe taken from the article
- Curiosity is fine, clickbait is not: the video must deliver on the title
Bad: "How to Choose the Best Marketing Agency"
Good: "Avoid Bad Marketing Agencies: 7 Questions Founders Skip"

DESCRIPTION (200-300 characters)
- Sentence 1 expands the title hook with a specific benefit
- Sentences 2-3 say exactly what viewers will learn
- Final sentence is a clear call to action (subscribe, watch, apply)"#;

const ANTI_PATTERNS: &str = r#"BANNED PHRASES (output containing any of these is rejected)

LinkedIn: "In today's rapidly evolving landscape", "I'm excited to share", "Let's dive in", "Here's the thing", "At the end of the day", "Game-changing insights", "Thrilled to announce", "Proud to say", "Delighted to share"
Twitter: "Here are X things about Y", "A thread" as the only hook, "Let me explain", "Quick thread on", "Some thoughts on"
Everywhere: "Leverage", "Unlock", "Tap into", "Deep dive", "Ecosystem", "Synergy", and generic questions such as "What do you think?", "Agree?", "Thoughts?""#;

const VARIATION: &str = r#"VARIATION
The three LinkedIn posts must differ in opening hook, sentence structure, tone (educational, confrontational, vulnerable) and angle. Three rewordings of the same point is a failure."#;

const OUTPUT_FORMAT: &str = r#"OUTPUT FORMAT
Return ONLY this JSON object. No markdown, no explanation, no backticks:

{
  "linkedinPosts": ["post1", "post2", "post3"],
  "twitterThreads": ["hook1", "hook2", "hook3"],
  "metaDescription": "description",
  "youtubeTitle": "title",
  "youtubeDescription": "description"
}

Every field must meet the rules above. Quality over speed."#;

/// Embeds the article verbatim between the persona and the per-platform rules.
pub fn build_prompt(content: &str) -> String {
    let sections = [LINKEDIN, TWITTER, META, YOUTUBE, ANTI_PATTERNS, VARIATION, OUTPUT_FORMAT];
    let mut prompt = String::with_capacity(content.len() + 8192);

    prompt.push_str(PERSONA);
    prompt.push_str("\n\nBLOG CONTENT:\n---\n");
    prompt.push_str(content);
    prompt.push_str("\n---\n\n");
    prompt.push_str(TASK);

    for section in sections {
        prompt.push_str("\n\n");
        prompt.push_str(DIVIDER);
        prompt.push_str("\n\n");
        prompt.push_str(section);
    }

    prompt
}
