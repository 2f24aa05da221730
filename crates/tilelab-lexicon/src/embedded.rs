//! Embedded fallback word list.
//!
//! Used when `data/words.txt` is absent so the backend can still serve
//! a classroom session out of the box. Deliberately small: common
//! classroom vocabulary plus enough short words to exercise the
//! construction engine.

/// Fallback dictionary, lowercase, length >= 2.
pub const FALLBACK_WORDS: &[&str] = &[
    "aboard", "about", "above", "acorn", "act", "actor", "add", "after", "again", "air",
    "all", "also", "and", "animal", "answer", "ant", "any", "apple", "are", "arm",
    "art", "ask", "ate", "away", "baby", "back", "bad", "bag", "ball", "band",
    "bark", "barn", "bat", "bath", "bear", "beat", "bed", "bee", "been", "before",
    "bell", "belt", "bend", "best", "big", "bike", "bird", "bit", "bite", "black",
    "blue", "board", "boat", "body", "bone", "book", "born", "both", "box", "boy",
    "bread", "break", "bring", "brown", "bug", "burn", "bus", "but", "buy", "cab",
    "cake", "call", "came", "camp", "can", "cap", "car", "card", "care", "cart",
    "case", "cast", "cat", "catch", "cave", "cent", "chair", "chat", "chin", "city",
    "clap", "class", "clay", "clean", "clip", "coat", "coin", "cold", "come", "cook",
    "cool", "corn", "cost", "cot", "could", "count", "cow", "crab", "cream", "crop",
    "crow", "cub", "cup", "cut", "dad", "dance", "dark", "dart", "day", "dear",
    "deep", "deer", "den", "desk", "did", "dig", "dim", "dime", "dine", "dinner",
    "dirt", "dish", "dive", "dog", "doll", "done", "door", "dot", "down", "drag",
    "draw", "dream", "drip", "drop", "drum", "dry", "duck", "dust", "each", "ear",
    "earn", "east", "eat", "egg", "eight", "elephant", "end", "enter", "eve", "even",
    "ever", "every", "eye", "face", "fact", "fall", "fan", "far", "farm", "fast",
    "fat", "feed", "feel", "feet", "fell", "felt", "fin", "find", "fine", "fire",
    "first", "fish", "fit", "five", "flag", "flat", "flew", "fly", "fog", "food",
    "foot", "for", "fort", "four", "fox", "free", "frog", "from", "fun", "game",
    "gate", "gave", "get", "gift", "girl", "give", "glad", "goat", "goes", "gold",
    "gone", "good", "got", "grab", "grass", "green", "grew", "grow", "had", "hand",
    "hard", "harm", "has", "hat", "have", "hay", "head", "hear", "heart", "heat",
    "heel", "hello", "help", "hen", "her", "here", "hero", "hex", "hid", "hide",
    "high", "hill", "him", "hint", "his", "hit", "hive", "hold", "hole", "home",
    "hop", "hope", "horn", "horse", "hot", "house", "how", "hug", "hum", "hunt",
    "ice", "inch", "ink", "into", "iron", "item", "jam", "jar", "jet", "job",
    "jog", "join", "joke", "jump", "just", "keep", "kept", "key", "kick", "kid",
    "kind", "king", "kit", "kite", "knee", "knew", "know", "lab", "lake", "lamp",
    "land", "lap", "large", "last", "late", "lead", "leaf", "lean", "leap", "learn",
    "left", "leg", "lemon", "lend", "less", "let", "letter", "life", "lift", "light",
    "like", "lime", "line", "lion", "lip", "list", "listen", "lit", "live", "load",
    "loaf", "lock", "log", "long", "look", "loop", "lost", "lot", "loud", "love",
    "low", "luck", "lunch", "mad", "made", "mail", "main", "make", "man", "many",
    "map", "mark", "mat", "match", "mate", "math", "meal", "mean", "meat", "meet",
    "melt", "men", "mend", "met", "mice", "milk", "mind", "mine", "mint", "miss",
    "mix", "mom", "moon", "mop", "more", "most", "moth", "mouse", "move", "much",
    "mud", "mug", "music", "must", "nail", "name", "nap", "near", "neat", "neck",
    "need", "nest", "net", "new", "next", "nice", "night", "nine", "nod", "north",
    "nose", "not", "note", "now", "nut", "oak", "oar", "oat", "ocean", "off",
    "oil", "old", "once", "one", "only", "open", "orbit", "other", "our", "out",
    "oven", "over", "owl", "own", "pack", "page", "paint", "pair", "pal", "pan",
    "pant", "paper", "park", "part", "pass", "past", "pat", "path", "paw", "pay",
    "pea", "peak", "pear", "pen", "pet", "pick", "pie", "pig", "pin", "pine",
    "pink", "pit", "plan", "plant", "play", "plot", "plum", "pod", "point", "pond",
    "pool", "pop", "port", "post", "pot", "pour", "pull", "pup", "push", "put",
    "quiet", "quit", "race", "rag", "rain", "ran", "ranch", "rat", "rate", "raw",
    "reach", "read", "real", "red", "rent", "rest", "rice", "rich", "ride", "ring",
    "ripe", "rise", "road", "roar", "rob", "rock", "rod", "rode", "roll", "roof",
    "room", "root", "rope", "rose", "row", "rub", "rug", "rule", "run", "rust",
    "sad", "safe", "sail", "salt", "same", "sand", "sang", "sat", "save", "saw",
    "say", "sea", "seal", "seat", "see", "seed", "seen", "sell", "send", "sent",
    "set", "seven", "sew", "shape", "share", "sharp", "she", "sheep", "shell", "ship",
    "shoe", "shop", "short", "show", "shut", "sick", "side", "sign", "silk", "sing",
    "sink", "sit", "six", "size", "skin", "skip", "sky", "sled", "sleep", "slid",
    "slide", "slow", "small", "smart", "smell", "smile", "snack", "snail", "snake", "snow",
    "soap", "sock", "soft", "soil", "sold", "some", "son", "song", "soon", "sort",
    "sound", "soup", "south", "space", "spell", "spin", "spot", "spring", "star", "start",
    "stay", "stem", "step", "stick", "still", "sting", "stone", "stop", "store", "storm",
    "story", "sun", "swim", "table", "tail", "take", "talk", "tall", "tan", "tap",
    "tape", "tar", "task", "taste", "teach", "team", "tear", "tell", "ten", "tent",
    "test", "than", "that", "the", "them", "then", "they", "thin", "thing", "think",
    "this", "three", "tide", "tie", "tiger", "time", "tin", "tiny", "tip", "toad",
    "toe", "told", "ton", "too", "took", "tool", "top", "tore", "torn", "toss",
    "touch", "town", "toy", "trace", "track", "trade", "train", "trap", "tree", "trip",
    "truck", "true", "try", "tub", "tune", "turn", "two", "under", "unit", "use",
    "van", "vast", "vet", "vine", "visit", "wag", "wait", "wake", "walk", "wall",
    "want", "war", "warm", "was", "wash", "watch", "water", "wave", "way", "wear",
    "web", "week", "well", "went", "were", "west", "wet", "what", "wheel", "when",
    "which", "while", "white", "who", "why", "wide", "wig", "will", "win", "wind",
    "wing", "winter", "wise", "wish", "with", "wolf", "won", "wood", "word", "wore",
    "work", "world", "worm", "would", "wrap", "write", "yard", "yarn", "year", "yes",
    "yet", "you", "young", "your", "zebra", "zero", "zoo",
];
