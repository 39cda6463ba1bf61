mod flatten;
mod nested;
