use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::{Comment, Post};

/// A pure, local text transform applied to fetched records.
pub trait Translator: Send + Sync {
    fn translate_post(&self, post: &Post) -> Post;
    fn translate_comment(&self, comment: &Comment) -> Comment;
}

/// Word-for-word substitution table.
///
/// Alphabetic runs are looked up lower-cased; everything between them is
/// copied through untouched. A capitalised source word gets a capitalised
/// replacement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhraseTable {
    words: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct TableFile {
    #[serde(default)]
    words: HashMap<String, String>,
}

const BUILTIN: &[(&str, &str)] = &[
    ("a", "от"),
    ("ab", "от"),
    ("accusamus", "обвиняем"),
    ("ad", "к"),
    ("adipisci", "достигать"),
    ("alias", "иначе"),
    ("aliquam", "некоторую"),
    ("amet", "любить"),
    ("animi", "души"),
    ("aperiam", "откроем"),
    ("architecto", "зодчий"),
    ("at", "но"),
    ("aut", "или"),
    ("autem", "однако"),
    ("beatae", "блаженные"),
    ("blanditiis", "ласки"),
    ("commodi", "удобства"),
    ("consectetur", "следует"),
    ("consequatur", "следует"),
    ("consequuntur", "следуют"),
    ("corporis", "тела"),
    ("culpa", "вина"),
    ("cum", "с"),
    ("cumque", "всякий"),
    ("cupiditate", "желание"),
    ("debitis", "долги"),
    ("delectus", "выбор"),
    ("deleniti", "смягчённые"),
    ("deserunt", "покидают"),
    ("dicta", "сказанное"),
    ("dignissimos", "достойнейших"),
    ("distinctio", "различие"),
    ("dolor", "боль"),
    ("dolore", "болью"),
    ("dolorem", "боль"),
    ("dolores", "боли"),
    ("doloribus", "болями"),
    ("dolorum", "болей"),
    ("ducimus", "ведём"),
    ("ea", "это"),
    ("eaque", "и это"),
    ("earum", "их"),
    ("eius", "его"),
    ("eligendi", "выбора"),
    ("enim", "ведь"),
    ("eos", "их"),
    ("error", "ошибка"),
    ("esse", "быть"),
    ("est", "есть"),
    ("et", "и"),
    ("eum", "его"),
    ("eveniet", "случится"),
    ("ex", "из"),
    ("excepturi", "исключение"),
    ("exercitationem", "упражнение"),
    ("expedita", "свободная"),
    ("explicabo", "объясню"),
    ("facere", "делать"),
    ("facilis", "лёгкий"),
    ("fuga", "бегство"),
    ("fugiat", "избегает"),
    ("fugit", "бежит"),
    ("harum", "этих"),
    ("hic", "здесь"),
    ("id", "это"),
    ("illo", "тот"),
    ("illum", "того"),
    ("impedit", "мешает"),
    ("in", "в"),
    ("incidunt", "случаются"),
    ("ipsa", "сама"),
    ("ipsam", "саму"),
    ("ipsum", "само"),
    ("iste", "этот"),
    ("itaque", "итак"),
    ("iure", "по праву"),
    ("iusto", "справедливо"),
    ("labore", "трудом"),
    ("laboriosam", "трудолюбивую"),
    ("laborum", "трудов"),
    ("laudantium", "хвалящих"),
    ("magnam", "великую"),
    ("magni", "великие"),
    ("maiores", "большие"),
    ("maxime", "особенно"),
    ("minima", "малейшие"),
    ("minus", "меньше"),
    ("modi", "меры"),
    ("molestiae", "тягости"),
    ("molestias", "тягость"),
    ("mollitia", "мягкость"),
    ("natus", "рождённый"),
    ("necessitatibus", "нуждам"),
    ("neque", "и не"),
    ("nesciunt", "не знают"),
    ("nihil", "ничто"),
    ("nisi", "если не"),
    ("nobis", "нам"),
    ("non", "не"),
    ("nostrum", "наш"),
    ("nulla", "никакая"),
    ("numquam", "никогда"),
    ("occaecati", "ослеплённые"),
    ("odio", "ненависть"),
    ("odit", "ненавидит"),
    ("officia", "обязанности"),
    ("officiis", "обязанностям"),
    ("omnis", "всякий"),
    ("optio", "выбор"),
    ("pariatur", "рождается"),
    ("perferendis", "переносимых"),
    ("perspiciatis", "рассмотрим"),
    ("placeat", "угодно"),
    ("porro", "далее"),
    ("possimus", "можем"),
    ("praesentium", "присутствующих"),
    ("provident", "предвидят"),
    ("quae", "которые"),
    ("quaerat", "ищет"),
    ("quam", "как"),
    ("quas", "которые"),
    ("quasi", "как бы"),
    ("qui", "который"),
    ("quia", "потому что"),
    ("quibusdam", "некоторым"),
    ("quidem", "впрочем"),
    ("quis", "кто"),
    ("quisquam", "кто-либо"),
    ("quo", "где"),
    ("quod", "что"),
    ("quos", "которых"),
    ("ratione", "разумом"),
    ("recusandae", "отвергнуть"),
    ("reiciendis", "отбросить"),
    ("rem", "дело"),
    ("repellat", "отталкивает"),
    ("repellendus", "отталкиваемый"),
    ("reprehenderit", "порицает"),
    ("repudiandae", "отвергнуть"),
    ("rerum", "вещей"),
    ("saepe", "часто"),
    ("sapiente", "мудрый"),
    ("sed", "но"),
    ("sequi", "следовать"),
    ("similique", "подобно"),
    ("sint", "пусть будут"),
    ("sit", "пусть"),
    ("soluta", "свободная"),
    ("sunt", "суть"),
    ("suscipit", "принимает"),
    ("tempora", "времена"),
    ("tempore", "временем"),
    ("temporibus", "временам"),
    ("tenetur", "держится"),
    ("totam", "всю"),
    ("ullam", "какую-либо"),
    ("unde", "откуда"),
    ("ut", "чтобы"),
    ("vel", "или"),
    ("velit", "хочет"),
    ("veniam", "прощение"),
    ("veritatis", "истины"),
    ("vero", "поистине"),
    ("vitae", "жизни"),
    ("voluptas", "наслаждение"),
    ("voluptate", "наслаждением"),
    ("voluptatem", "наслаждение"),
    ("voluptates", "наслаждения"),
    ("voluptatibus", "наслаждениям"),
    ("voluptatum", "наслаждений"),
];

impl PhraseTable {
    pub fn new(words: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            words: words
                .into_iter()
                .map(|(from, to)| (from.to_lowercase(), to))
                .collect(),
        }
    }

    /// Latin placeholder vocabulary rendered into Russian.
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string())),
        )
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let file: TableFile = toml::from_str(raw).context("invalid translation table")?;
        Ok(Self::new(file.words))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read translation table {}", path.display()))?;
        Self::from_toml_str(&raw)
    }

    /// Entries of `other` win over entries already present.
    pub fn with_overrides(mut self, other: PhraseTable) -> Self {
        self.words.extend(other.words);
        self
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn translate_text(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut word = String::new();
        for ch in text.chars() {
            if ch.is_alphabetic() {
                word.push(ch);
            } else {
                self.push_word(&mut out, &word);
                word.clear();
                out.push(ch);
            }
        }
        self.push_word(&mut out, &word);
        out
    }

    fn push_word(&self, out: &mut String, word: &str) {
        if word.is_empty() {
            return;
        }
        match self.words.get(&word.to_lowercase()) {
            Some(replacement) if word.chars().next().is_some_and(char::is_uppercase) => {
                let mut chars = replacement.chars();
                if let Some(first) = chars.next() {
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                }
            }
            Some(replacement) => out.push_str(replacement),
            None => out.push_str(word),
        }
    }
}

impl Translator for PhraseTable {
    fn translate_post(&self, post: &Post) -> Post {
        Post {
            title: self.translate_text(&post.title),
            body: self.translate_text(&post.body),
            ..post.clone()
        }
    }

    fn translate_comment(&self, comment: &Comment) -> Comment {
        Comment {
            name: self.translate_text(&comment.name),
            body: self.translate_text(&comment.body),
            ..comment.clone()
        }
    }
}
